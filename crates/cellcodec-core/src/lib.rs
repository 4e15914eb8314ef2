//! # cellcodec-core
//!
//! Typed access to column-family rows. Every byte field of a row goes through
//! a configurable codec chosen by field identity and, for values, by the
//! cell timestamp.
//!
//! ## Architecture
//!
//! ```text
//! DecodedTable (get / scan / count)      ← table
//!     ↓
//! RowDecoder + InclusionPolicy           ← decoder
//!     ↓
//! CodecRegistry → VersionedCodecTable    ← registry
//!     ↓
//! Transcoder (text, typed bytes, ...)    ← codec
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use cellcodec_core::{CodecRegistry, TextCodec, TypedBytesCodec, ValueCodecTier};
//! use std::sync::Arc;
//!
//! let mut registry = CodecRegistry::new();
//! registry
//!     .set_versioned_field_codec(b"d", Some(&b"temp"[..]), 100, 200, Arc::new(TypedBytesCodec::single()))
//!     .unwrap();
//!
//! let (tier, codec) = registry.resolve_value_codec_tier(b"d", b"temp", 150);
//! assert_eq!(tier, ValueCodecTier::ExactVersioned);
//! assert_eq!(codec.name(), "typed_bytes_single");
//! assert_eq!(registry.resolve_value_codec(b"d", b"temp", 250).name(), TextCodec::NAME);
//! ```

pub mod codec;
pub mod decoder;
pub mod error;
pub mod registry;
pub mod table;

pub use codec::{CodecCatalog, SharedTranscoder, TextCodec, Transcoder, TypedBytesCodec};
pub use decoder::{DecodedCell, DecodedRow, InclusionPolicy, RowDecoder};
pub use error::{CellCodecError, Result};
pub use registry::{CodecRegistry, Interval, ValueCodecTier, VersionedCodecTable};
pub use table::{DecodedTable, ScanSession};
