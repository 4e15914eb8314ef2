//! Conversion utilities shared across cellcodec crates.
//!
//! # Module Organization
//!
//! - `string_binary` - bytes ↔ binary-escaped text (row keys, families, qualifiers)
//! - `value_json` - `Value` ↔ `serde_json::Value` (CLI output and input)

pub mod string_binary;
pub mod value_json;

pub use string_binary::{to_bytes_binary, to_string_binary};
pub use value_json::{json_to_value, value_to_json};
