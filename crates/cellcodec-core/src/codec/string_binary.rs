//! Binary-escaped text codec.

use super::transcoder::Transcoder;
use cellcodec_commons::{to_bytes_binary, to_string_binary, CodecError, Value};

/// Renders bytes as text, escaping anything that isn't printable ASCII as
/// `\xHH`. Decoding followed by encoding gives back the original bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextCodec;

impl TextCodec {
    pub const NAME: &'static str = "text";
}

impl Transcoder for TextCodec {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        Ok(Value::Text(to_string_binary(bytes)))
    }

    fn encode(&self, values: &[Value]) -> Result<Vec<u8>, CodecError> {
        match values {
            [Value::Text(text)] => Ok(to_bytes_binary(text)),
            [other] => Err(CodecError::unsupported_value(format!(
                "text codec expects a text value, got {}",
                other.type_name()
            ))),
            _ => Err(CodecError::unsupported_value(format!(
                "text codec expects exactly one value, got {}",
                values.len()
            ))),
        }
    }
}
