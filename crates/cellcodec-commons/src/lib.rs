//! # cellcodec-commons
//!
//! Shared types, conversions, and configuration for cellcodec.
//!
//! This crate provides the foundational types used across all cellcodec crates
//! (cellcodec-store, cellcodec-core, cellcodec-cli):
//!
//! - `Value`: the closed set of structured values a codec can produce
//! - `Cell`: one `(family, qualifier, timestamp, value)` unit of a stored row
//! - `FieldKey`: column identity, with an optional wildcard qualifier
//! - `CodecError` / `ConfigurationError`: errors shared by codecs and configuration
//! - `CellCodecConfig`: TOML configuration (logging, store, per-table codecs)
//!
//! ## Example Usage
//!
//! ```rust
//! use cellcodec_commons::{Cell, FieldKey, Value};
//!
//! let cell = Cell::new(b"d".to_vec(), b"temp".to_vec(), 100, b"21.5".to_vec());
//! let key = FieldKey::column(cell.family(), cell.qualifier());
//! assert!(!key.is_wildcard());
//!
//! let value = Value::Text("21.5".to_string());
//! assert_eq!(value.as_str(), Some("21.5"));
//! ```

pub mod config;
pub mod conversions;
pub mod errors;
pub mod models;

pub use config::{CellCodecConfig, FieldCodecConfig, IncludeConfig, TableConfig};
pub use conversions::{to_bytes_binary, to_string_binary};
pub use errors::{CodecError, ConfigurationError};
pub use models::{Cell, FieldKey, Value};
