//! Shared error types for cellcodec.
//!
//! These errors are raised synchronously by codecs and by configuration calls.
//! They carry enough context to tell the caller what to fix before retrying.
//!
//! ## Example Usage
//!
//! ```rust
//! use cellcodec_commons::errors::CodecError;
//!
//! fn encode_one(values: &[String]) -> Result<Vec<u8>, CodecError> {
//!     match values {
//!         [single] => Ok(single.as_bytes().to_vec()),
//!         _ => Err(CodecError::unsupported_value("expected exactly one value")),
//!     }
//! }
//! ```

use std::fmt;

/// Errors raised by a transcoder while converting between bytes and values.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// `encode` received a value shape it cannot handle (wrong arity or type)
    UnsupportedValue(String),

    /// `decode` received bytes that do not follow the codec's format
    Malformed(String),
}

impl CodecError {
    /// Creates an UnsupportedValue error with a message.
    pub fn unsupported_value(msg: impl Into<String>) -> Self {
        Self::UnsupportedValue(msg.into())
    }

    /// Creates a Malformed error with a message.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::UnsupportedValue(msg) => write!(f, "Unsupported value: {}", msg),
            CodecError::Malformed(msg) => write!(f, "Malformed input: {}", msg),
        }
    }
}

impl std::error::Error for CodecError {}

/// Errors raised while configuring a codec registry.
///
/// A call that fails with one of these leaves the registry unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Interval with `stop < start`
    InvalidInterval { start: i64, stop: i64 },

    /// New interval overlaps one already registered for the same field
    OverlappingInterval {
        field: String,
        start: i64,
        stop: i64,
        existing_start: i64,
        existing_stop: i64,
    },

    /// Codec name not present in the codec catalog
    UnknownCodec(String),

    /// Any other invalid setting
    Invalid(String),
}

impl ConfigurationError {
    /// Creates an Invalid error with a message.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    /// Creates an UnknownCodec error for the given codec name.
    pub fn unknown_codec(name: impl Into<String>) -> Self {
        Self::UnknownCodec(name.into())
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::InvalidInterval { start, stop } => {
                write!(f, "Invalid interval: stop {} is before start {}", stop, start)
            },
            ConfigurationError::OverlappingInterval {
                field,
                start,
                stop,
                existing_start,
                existing_stop,
            } => write!(
                f,
                "Interval [{}, {}) for {} overlaps existing interval [{}, {})",
                start, stop, field, existing_start, existing_stop
            ),
            ConfigurationError::UnknownCodec(name) => write!(f, "Unknown codec: {}", name),
            ConfigurationError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigurationError {}
