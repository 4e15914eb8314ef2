//! Codecs ("transcoders") between stored bytes and [`Value`](cellcodec_commons::Value)s.

pub mod catalog;
pub mod string_binary;
pub mod transcoder;
pub mod typed_bytes;

pub use catalog::CodecCatalog;
pub use string_binary::TextCodec;
pub use transcoder::{SharedTranscoder, Transcoder};
pub use typed_bytes::TypedBytesCodec;
