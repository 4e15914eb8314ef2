//! Field → codec resolution.

mod codec_registry;
mod config;
pub mod interval;
pub mod versioned;

pub use codec_registry::{CodecRegistry, ValueCodecTier, VALUE_CODEC_TIERS};
pub use interval::Interval;
pub use versioned::VersionedCodecTable;
