//! Row decoding.

pub mod decoded_row;
pub mod inclusion;
pub mod row_decoder;

pub use decoded_row::{DecodedCell, DecodedRow};
pub use inclusion::InclusionPolicy;
pub use row_decoder::RowDecoder;
