//! Typed-bytes stream codec.
//!
//! Values are written back to back, each as a one-byte type code followed by
//! its payload. Integers are big-endian; lengths and counts are `i32`.
//!
//! | code | type   | payload                                |
//! |------|--------|----------------------------------------|
//! | 0    | bytes  | len, raw bytes                         |
//! | 1    | byte   | 1 byte                                 |
//! | 2    | bool   | 1 byte, non-zero = true                |
//! | 3    | int    | 4 bytes                                |
//! | 4    | long   | 8 bytes                                |
//! | 5    | float  | 4 bytes IEEE-754                       |
//! | 6    | double | 8 bytes IEEE-754                       |
//! | 7    | string | len, UTF-8 bytes                       |
//! | 8    | vector | count, then `count` values             |
//! | 9    | list   | values, then the marker                |
//! | 10   | map    | count, then `count` key/value pairs    |
//! | 255  | marker | ends a list; at top level ends a stream|

use super::transcoder::Transcoder;
use cellcodec_commons::{CodecError, Value};

const CODE_BYTES: u8 = 0;
const CODE_BYTE: u8 = 1;
const CODE_BOOL: u8 = 2;
const CODE_INT: u8 = 3;
const CODE_LONG: u8 = 4;
const CODE_FLOAT: u8 = 5;
const CODE_DOUBLE: u8 = 6;
const CODE_STRING: u8 = 7;
const CODE_VECTOR: u8 = 8;
const CODE_LIST: u8 = 9;
const CODE_MAP: u8 = 10;
const CODE_MARKER: u8 = 255;

/// Containers nested deeper than this are rejected as malformed.
const MAX_DEPTH: usize = 64;

/// Typed-bytes codec.
///
/// With `single` set, decoding returns only the first value of the stream
/// (or an empty vector when the stream is empty). Otherwise it returns a
/// `Value::Vector` holding every value in order.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypedBytesCodec {
    single: bool,
}

impl TypedBytesCodec {
    pub const NAME: &'static str = "typed_bytes";
    pub const SINGLE_NAME: &'static str = "typed_bytes_single";

    pub fn new(single: bool) -> Self {
        Self { single }
    }

    pub fn single() -> Self {
        Self::new(true)
    }

    pub fn is_single(&self) -> bool {
        self.single
    }
}

impl Transcoder for TypedBytesCodec {
    fn name(&self) -> &str {
        if self.single {
            Self::SINGLE_NAME
        } else {
            Self::NAME
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        let mut reader = Reader::new(bytes);
        let mut values = Vec::new();

        while !reader.is_empty() {
            let code = reader.u8()?;
            if code == CODE_MARKER {
                break;
            }
            let value = reader.value(code, 0)?;
            if self.single {
                return Ok(value);
            }
            values.push(value);
        }

        Ok(Value::Vector(values))
    }

    fn encode(&self, values: &[Value]) -> Result<Vec<u8>, CodecError> {
        if values.is_empty() {
            return Err(CodecError::unsupported_value("typed bytes codec needs at least one value"));
        }

        let mut out = Vec::new();
        for value in values {
            write_value(&mut out, value)?;
        }
        Ok(out)
    }
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.buf.len())
            .ok_or_else(|| {
                CodecError::malformed(format!(
                    "truncated input: need {} bytes at offset {}, have {}",
                    n,
                    self.pos,
                    self.buf.len() - self.pos
                ))
            })?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.array::<1>()?[0])
    }

    fn len(&mut self) -> Result<usize, CodecError> {
        let n = i32::from_be_bytes(self.array()?);
        usize::try_from(n).map_err(|_| CodecError::malformed(format!("negative length {}", n)))
    }

    fn value(&mut self, code: u8, depth: usize) -> Result<Value, CodecError> {
        if depth > MAX_DEPTH {
            return Err(CodecError::malformed("containers nested too deeply"));
        }

        let value = match code {
            CODE_BYTES => {
                let len = self.len()?;
                Value::Bytes(self.take(len)?.to_vec())
            },
            CODE_BYTE => Value::Byte(i8::from_be_bytes(self.array()?)),
            CODE_BOOL => Value::Bool(self.u8()? != 0),
            CODE_INT => Value::Int(i32::from_be_bytes(self.array()?)),
            CODE_LONG => Value::Long(i64::from_be_bytes(self.array()?)),
            CODE_FLOAT => Value::Float(f32::from_be_bytes(self.array()?)),
            CODE_DOUBLE => Value::Double(f64::from_be_bytes(self.array()?)),
            CODE_STRING => {
                let len = self.len()?;
                let text = std::str::from_utf8(self.take(len)?)
                    .map_err(|e| CodecError::malformed(format!("invalid UTF-8 in string: {}", e)))?;
                Value::Text(text.to_string())
            },
            CODE_VECTOR => {
                let count = self.len()?;
                let mut items = Vec::new();
                for _ in 0..count {
                    items.push(self.nested(depth)?);
                }
                Value::Vector(items)
            },
            CODE_LIST => {
                let mut items = Vec::new();
                loop {
                    let code = self.u8()?;
                    if code == CODE_MARKER {
                        break;
                    }
                    items.push(self.value(code, depth + 1)?);
                }
                Value::List(items)
            },
            CODE_MAP => {
                let count = self.len()?;
                let mut entries = Vec::new();
                for _ in 0..count {
                    let key = self.nested(depth)?;
                    let value = self.nested(depth)?;
                    entries.push((key, value));
                }
                Value::Map(entries)
            },
            CODE_MARKER => return Err(CodecError::malformed("unexpected end marker")),
            other => return Err(CodecError::malformed(format!("unknown type code {}", other))),
        };

        Ok(value)
    }

    /// Reads one element of a counted container.
    fn nested(&mut self, depth: usize) -> Result<Value, CodecError> {
        let code = self.u8()?;
        self.value(code, depth + 1)
    }
}

fn write_len(out: &mut Vec<u8>, n: usize) -> Result<(), CodecError> {
    let n = i32::try_from(n)
        .map_err(|_| CodecError::unsupported_value(format!("length {} exceeds i32::MAX", n)))?;
    out.extend_from_slice(&n.to_be_bytes());
    Ok(())
}

fn write_value(out: &mut Vec<u8>, value: &Value) -> Result<(), CodecError> {
    match value {
        Value::Bytes(bytes) => {
            out.push(CODE_BYTES);
            write_len(out, bytes.len())?;
            out.extend_from_slice(bytes);
        },
        Value::Byte(v) => {
            out.push(CODE_BYTE);
            out.extend_from_slice(&v.to_be_bytes());
        },
        Value::Bool(v) => {
            out.push(CODE_BOOL);
            out.push(u8::from(*v));
        },
        Value::Int(v) => {
            out.push(CODE_INT);
            out.extend_from_slice(&v.to_be_bytes());
        },
        Value::Long(v) => {
            out.push(CODE_LONG);
            out.extend_from_slice(&v.to_be_bytes());
        },
        Value::Float(v) => {
            out.push(CODE_FLOAT);
            out.extend_from_slice(&v.to_be_bytes());
        },
        Value::Double(v) => {
            out.push(CODE_DOUBLE);
            out.extend_from_slice(&v.to_be_bytes());
        },
        Value::Text(text) => {
            out.push(CODE_STRING);
            write_len(out, text.len())?;
            out.extend_from_slice(text.as_bytes());
        },
        Value::Vector(items) => {
            out.push(CODE_VECTOR);
            write_len(out, items.len())?;
            for item in items {
                write_value(out, item)?;
            }
        },
        Value::List(items) => {
            out.push(CODE_LIST);
            for item in items {
                write_value(out, item)?;
            }
            out.push(CODE_MARKER);
        },
        Value::Map(entries) => {
            out.push(CODE_MAP);
            write_len(out, entries.len())?;
            for (key, value) in entries {
                write_value(out, key)?;
                write_value(out, value)?;
            }
        },
    }
    Ok(())
}
