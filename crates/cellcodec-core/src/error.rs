use cellcodec_commons::{CodecError, ConfigurationError};
use cellcodec_store::StorageError;
use thiserror::Error;

/// Result type for decoding and registry operations.
pub type Result<T> = std::result::Result<T, CellCodecError>;

/// Errors surfaced by cellcodec-core.
#[derive(Debug, Error)]
pub enum CellCodecError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
    #[error("Store error: {0}")]
    Store(#[from] StorageError),
}
