//! Command implementations over a decoded table.
//!
//! Each command writes one JSON document per line to `out`.

use crate::error::{CliError, Result};
use crate::formatter::{row_to_json, write_json};
use cellcodec_commons::conversions::json_to_value;
use cellcodec_commons::{to_bytes_binary, Value};
use cellcodec_core::DecodedTable;
use cellcodec_store::Scan;
use std::io::Write;

/// Options of the `scan` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Inclusive start row, binary-escaped
    pub start: Option<String>,
    /// Exclusive stop row, binary-escaped
    pub stop: Option<String>,
    /// Stop after this many rows
    pub limit: Option<usize>,
    /// Rows decoded per batch
    pub batch: usize,
}

/// Prints the decoded row, or `null` when it doesn't exist.
pub fn get<W: Write>(table: &DecodedTable, row: &str, out: &mut W, pretty: bool) -> Result<()> {
    let json = match table.get(&to_bytes_binary(row))? {
        Some(row) => row_to_json(&row),
        None => serde_json::Value::Null,
    };
    write_json(out, &json, pretty)
}

/// Prints every decoded row of the range and returns how many were printed.
pub fn scan<W: Write>(table: &DecodedTable, options: &ScanOptions, out: &mut W, pretty: bool) -> Result<u64> {
    let mut request = Scan::new().with_caching(options.batch.max(1));
    if let Some(start) = &options.start {
        request = request.with_start_row(to_bytes_binary(start));
    }
    if let Some(stop) = &options.stop {
        request = request.with_stop_row(to_bytes_binary(stop));
    }

    let mut session = table.open_scan(request)?;
    let mut remaining = options.limit.unwrap_or(usize::MAX);
    while remaining > 0 {
        let batch = session.next_batch(Some(options.batch.max(1).min(remaining)))?;
        if batch.is_empty() {
            break;
        }
        remaining -= batch.len();
        for row in &batch {
            write_json(out, &row_to_json(row), pretty)?;
        }
    }

    log::debug!("Scan finished after {} rows", session.current_count());
    Ok(session.current_count())
}

/// Prints the number of rows in the table.
pub fn count<W: Write>(table: &DecodedTable, batch_size: usize, out: &mut W) -> Result<u64> {
    let count = table.count(batch_size)?;
    writeln!(out, "{}", count)?;
    Ok(count)
}

/// Parses a command-line value: JSON when it parses, plain text otherwise.
/// A top-level JSON array supplies several values to the codec.
pub fn parse_values(raw: &str) -> Result<Vec<Value>> {
    let json = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => json,
        Err(_) => return Ok(vec![Value::Text(raw.to_string())]),
    };

    let value = json_to_value(&json).map_err(|e| CliError::ParseError(e.to_string()))?;
    match value {
        Value::Vector(items) => Ok(items),
        other => Ok(vec![other]),
    }
}

/// Encodes the value with the resolved codec and writes it.
pub fn put(
    table: &DecodedTable,
    row: &str,
    family: &str,
    qualifier: &str,
    raw_value: &str,
    timestamp: Option<i64>,
) -> Result<()> {
    let values = parse_values(raw_value)?;
    table.put_encoded(
        &to_bytes_binary(row),
        &to_bytes_binary(family),
        &to_bytes_binary(qualifier),
        timestamp,
        &values,
    )?;
    log::info!("Wrote {}:{} of row {}", family, qualifier, row);
    Ok(())
}
