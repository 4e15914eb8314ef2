//! Key encoding utilities for RocksDB cell keys.
//!
//! Every cell of a table lives in the table's column family under the key
//!
//! ```text
//! esc(row) ‖ esc(family) ‖ esc(qualifier) ‖ ts_desc (8 bytes)
//! ```
//!
//! `esc` writes the bytes with `0x00` replaced by `0x00 0xFF` and appends the
//! terminator `0x00 0x01`. The escaping is prefix-free and order-preserving,
//! so a forward iteration visits rows in byte order, then families, then
//! qualifiers. `ts_desc` is the big-endian timestamp with the sign bit flipped
//! and all bits inverted, which puts the newest version of a column first.

use anyhow::{Context, Result};

const ESCAPE: u8 = 0x00;
const ESCAPED_ZERO: u8 = 0xFF;
const TERMINATOR: u8 = 0x01;
const TIMESTAMP_LEN: usize = 8;

fn push_segment(out: &mut Vec<u8>, bytes: &[u8]) {
    for &b in bytes {
        if b == ESCAPE {
            out.push(ESCAPE);
            out.push(ESCAPED_ZERO);
        } else {
            out.push(b);
        }
    }
    out.push(ESCAPE);
    out.push(TERMINATOR);
}

fn read_segment(key: &[u8], pos: &mut usize) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    loop {
        let b = *key.get(*pos).context("Unterminated key segment")?;
        *pos += 1;
        if b != ESCAPE {
            out.push(b);
            continue;
        }
        let marker = *key.get(*pos).context("Truncated escape in key segment")?;
        *pos += 1;
        match marker {
            ESCAPED_ZERO => out.push(ESCAPE),
            TERMINATOR => return Ok(out),
            other => anyhow::bail!("Invalid escape byte {:#04x} in key segment", other),
        }
    }
}

fn encode_timestamp(ts: i64) -> [u8; TIMESTAMP_LEN] {
    (!((ts as u64) ^ (1 << 63))).to_be_bytes()
}

fn decode_timestamp(bytes: [u8; TIMESTAMP_LEN]) -> i64 {
    ((!u64::from_be_bytes(bytes)) ^ (1 << 63)) as i64
}

/// Encode the prefix shared by every cell of a row.
///
/// # Examples
///
/// ```
/// use cellcodec_store::key_encoding::row_prefix;
///
/// assert_eq!(row_prefix(b"a\x00b"), vec![b'a', 0x00, 0xFF, b'b', 0x00, 0x01]);
/// ```
pub fn row_prefix(row: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(row.len() + 2);
    push_segment(&mut out, row);
    out
}

/// Smallest key that sorts after every cell of `row` and at or before the
/// cells of any later row.
///
/// # Examples
///
/// ```
/// use cellcodec_store::key_encoding::{cell_key, row_end, row_prefix};
///
/// assert!(cell_key(b"r", b"d", b"q", i64::MIN) < row_end(b"r"));
/// assert!(row_end(b"r") < row_prefix(b"r\x00"));
/// ```
pub fn row_end(row: &[u8]) -> Vec<u8> {
    let mut out = row_prefix(row);
    // Terminator 0x00 0x01 becomes 0x00 0x02, between the terminator and an escaped zero
    if let Some(last) = out.last_mut() {
        *last = TERMINATOR + 1;
    }
    out
}

/// Encode the full key of one cell version.
pub fn cell_key(row: &[u8], family: &[u8], qualifier: &[u8], timestamp: i64) -> Vec<u8> {
    // Pre-allocate: three terminators plus the timestamp
    let mut out = Vec::with_capacity(row.len() + family.len() + qualifier.len() + 6 + TIMESTAMP_LEN);
    push_segment(&mut out, row);
    push_segment(&mut out, family);
    push_segment(&mut out, qualifier);
    out.extend_from_slice(&encode_timestamp(timestamp));
    out
}

/// Parse a cell key into `(row, family, qualifier, timestamp)`.
pub fn parse_cell_key(key: &[u8]) -> Result<(Vec<u8>, Vec<u8>, Vec<u8>, i64)> {
    let mut pos = 0;
    let row = read_segment(key, &mut pos).context("Failed to parse row")?;
    let family = read_segment(key, &mut pos).context("Failed to parse family")?;
    let qualifier = read_segment(key, &mut pos).context("Failed to parse qualifier")?;

    let ts_bytes: [u8; TIMESTAMP_LEN] = key
        .get(pos..)
        .filter(|rest| rest.len() == TIMESTAMP_LEN)
        .and_then(|rest| rest.try_into().ok())
        .context("Failed to parse timestamp")?;

    Ok((row, family, qualifier, decode_timestamp(ts_bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_key_roundtrip() {
        let key = cell_key(b"row\x001", b"d", b"\x00q\x00", -42);
        let (row, family, qualifier, ts) = parse_cell_key(&key).unwrap();
        assert_eq!(row, b"row\x001");
        assert_eq!(family, b"d");
        assert_eq!(qualifier, b"\x00q\x00");
        assert_eq!(ts, -42);
    }

    #[test]
    fn test_rows_sort_lexicographically() {
        let rows: [&[u8]; 5] = [b"", b"a", b"a\x00", b"a\x00\x00", b"ab"];
        for pair in rows.windows(2) {
            assert!(row_prefix(pair[0]) < row_prefix(pair[1]), "{:?} < {:?}", pair[0], pair[1]);
            assert!(
                cell_key(pair[0], b"z", b"z", 0) < cell_key(pair[1], b"", b"", 0),
                "cells of {:?} sort before cells of {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_cell_key_starts_with_row_prefix() {
        let key = cell_key(b"r1", b"d", b"q", 5);
        assert!(key.starts_with(&row_prefix(b"r1")));
        assert!(!key.starts_with(&row_prefix(b"r")));
    }

    #[test]
    fn test_row_end_bounds_the_row() {
        let rows: [&[u8]; 4] = [b"a", b"a\x00", b"a\x01", b"ab"];
        for pair in rows.windows(2) {
            let end = row_end(pair[0]);
            assert!(cell_key(pair[0], b"\xff", b"\xff", i64::MIN) < end);
            assert!(end <= row_prefix(pair[1]), "{:?} must end before {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_newer_versions_sort_first() {
        let timestamps = [i64::MAX, 1_000, 1, 0, -1, i64::MIN];
        for pair in timestamps.windows(2) {
            assert!(cell_key(b"r", b"d", b"q", pair[0]) < cell_key(b"r", b"d", b"q", pair[1]));
        }
    }

    #[test]
    fn test_families_then_qualifiers_sort() {
        assert!(cell_key(b"r", b"a", b"zz", 0) < cell_key(b"r", b"b", b"", 9));
        assert!(cell_key(b"r", b"a", b"q", 0) < cell_key(b"r", b"a", b"q2", 9));
    }

    #[test]
    fn test_invalid_keys() {
        assert!(parse_cell_key(b"row").is_err());
        assert!(parse_cell_key(&[b'r', 0x00, 0x07]).is_err());

        let mut key = cell_key(b"r", b"d", b"q", 1);
        key.pop();
        assert!(parse_cell_key(&key).is_err());
    }
}
