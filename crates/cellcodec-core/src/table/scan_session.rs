//! Scan sessions over a decoded table.

use super::decoded_table::DecodedTable;
use crate::decoder::DecodedRow;
use crate::error::Result;
use cellcodec_commons::Value;
use cellcodec_store::RowIterator;

/// One open scan with its own cursor.
///
/// The session borrows its table, so the table's registry cannot be
/// reconfigured while the scan is open. Dropping the session closes the
/// underlying store iterator.
pub struct ScanSession<'t> {
    table: &'t DecodedTable,
    rows: RowIterator<'t>,
    current_key: Option<Vec<u8>>,
    count: u64,
}

impl<'t> ScanSession<'t> {
    pub(crate) fn new(table: &'t DecodedTable, rows: RowIterator<'t>) -> Self {
        Self {
            table,
            rows,
            current_key: None,
            count: 0,
        }
    }

    /// Pulls and decodes up to `limit` rows (`None` = every remaining row).
    ///
    /// Returns a shorter or empty batch once the scan is exhausted. A store
    /// or codec error fails the whole batch.
    pub fn next_batch(&mut self, limit: Option<usize>) -> Result<Vec<DecodedRow>> {
        let limit = limit.unwrap_or(usize::MAX);
        let mut batch = Vec::new();
        while batch.len() < limit {
            match self.next() {
                Some(row) => batch.push(row?),
                None => break,
            }
        }
        Ok(batch)
    }

    /// Key of the last row fetched, decoded with the key codec; empty text
    /// before the first row.
    pub fn current_row(&self) -> Result<Value> {
        match &self.current_key {
            Some(key) => Ok(self.table.decode_key(key)?),
            None => Ok(Value::Text(String::new())),
        }
    }

    /// Rows fetched so far by this session.
    pub fn current_count(&self) -> u64 {
        self.count
    }
}

impl Iterator for ScanSession<'_> {
    type Item = Result<DecodedRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let stored = match self.rows.next()? {
            Ok(stored) => stored,
            Err(e) => return Some(Err(e.into())),
        };

        let (key, cells) = stored.into_parts();
        let decoded = self.table.decoder().decode_row(&key, &cells);
        self.current_key = Some(key);
        self.count += 1;
        Some(decoded)
    }
}
