//! Core data model shared by the store, the codecs, and the decoder.

mod cell;
mod field_key;
mod value;

pub use cell::Cell;
pub use field_key::FieldKey;
pub use value::Value;
