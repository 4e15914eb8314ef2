//! Error types for the cellcodec CLI.
//!
//! Provides user-facing messages for configuration, store and decoding
//! failures.

use cellcodec_core::CellCodecError;
use std::fmt;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug)]
pub enum CliError {
    /// Config file missing, unreadable or invalid
    ConfigurationError(String),

    /// Opening the store failed
    StoreError(String),

    /// Decoding, encoding or registry error
    CodecError(CellCodecError),

    /// Command argument could not be parsed
    ParseError(String),

    /// Writing output failed
    OutputError(String),
}

impl CliError {
    pub fn configuration(err: anyhow::Error) -> Self {
        CliError::ConfigurationError(format!("{:#}", err))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            CliError::StoreError(msg) => write!(f, "Store error: {}", msg),
            CliError::CodecError(err) => write!(f, "{}", err),
            CliError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            CliError::OutputError(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::CodecError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CellCodecError> for CliError {
    fn from(err: CellCodecError) -> Self {
        CliError::CodecError(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::OutputError(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::ParseError(err.to_string())
    }
}
