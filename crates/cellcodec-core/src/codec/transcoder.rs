use cellcodec_commons::{CodecError, Value};
use std::fmt;
use std::sync::Arc;

/// Converts between stored bytes and structured values.
///
/// Implementations are stateless or immutable after construction, so one
/// instance can be shared by every registry and thread.
pub trait Transcoder: Send + Sync + fmt::Debug {
    /// Name under which the codec is registered in a catalog.
    fn name(&self) -> &str;

    fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError>;

    /// Encodes `values`; fails with [`CodecError::UnsupportedValue`] when the
    /// arity or the value types are not supported by this codec.
    fn encode(&self, values: &[Value]) -> Result<Vec<u8>, CodecError>;
}

/// Shared handle to a codec.
pub type SharedTranscoder = Arc<dyn Transcoder>;
