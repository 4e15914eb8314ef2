//! JSON rendering of decoded rows.

use crate::error::Result;
use cellcodec_commons::conversions::value_to_json;
use cellcodec_core::DecodedRow;
use std::io::Write;

/// A decoded row as a JSON array: the key first (when included), then one
/// element per cell, tuples as nested arrays.
pub fn row_to_json(row: &DecodedRow) -> serde_json::Value {
    serde_json::Value::Array(row.to_values().iter().map(value_to_json).collect())
}

/// Writes one JSON document followed by a newline.
pub fn write_json<W: Write>(out: &mut W, json: &serde_json::Value, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, json)?;
    } else {
        serde_json::to_writer(&mut *out, json)?;
    }
    writeln!(out)?;
    Ok(())
}
