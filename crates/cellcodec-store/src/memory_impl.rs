//! In-memory implementation of the CellStore trait.
//!
//! Tables are ordered maps guarded by a single `RwLock`. A scan copies the
//! matching rows when it is opened, so it never holds the lock while the
//! caller iterates and it sees a stable snapshot of the table.

use crate::query::{now_millis, Get, Put, Scan};
use crate::storage_trait::{CellStore, Result, RowIterator, StorageError, StoredRow};
use cellcodec_commons::Cell;
use parking_lot::RwLock;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

/// (family, qualifier, newest-first timestamp)
type ColumnVersion = (Vec<u8>, Vec<u8>, Reverse<i64>);
type Row = BTreeMap<ColumnVersion, Vec<u8>>;
type Table = BTreeMap<Vec<u8>, Row>;

/// Thread-safe in-memory cell store.
///
/// ## Example
///
/// ```rust
/// use cellcodec_store::{CellStore, MemoryStore, Put, Scan};
///
/// let store = MemoryStore::new();
/// store.create_table("events").unwrap();
/// store.put("events", &Put::new(b"e1".to_vec()).add_column_at(b"d", b"kind", 1, b"click")).unwrap();
///
/// let rows: Vec<_> = store.scan("events", &Scan::new()).unwrap().collect();
/// assert_eq!(rows.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn row_cells(row: &Row) -> impl Iterator<Item = Cell> + '_ {
        row.iter().map(|((family, qualifier, Reverse(ts)), value)| {
            Cell::new(family.clone(), qualifier.clone(), *ts, value.clone())
        })
    }
}

impl CellStore for MemoryStore {
    fn get(&self, table: &str, get: &Get) -> Result<Option<StoredRow>> {
        let tables = self.tables.read();
        let rows = tables
            .get(table)
            .ok_or_else(|| StorageError::TableNotFound(table.to_string()))?;

        let Some(row) = rows.get(&get.row) else {
            return Ok(None);
        };

        let cells = get.filter().apply(Self::row_cells(row));
        if cells.is_empty() {
            return Ok(None);
        }
        Ok(Some(StoredRow::new(get.row.clone(), cells)))
    }

    fn scan(&self, table: &str, scan: &Scan) -> Result<RowIterator<'_>> {
        let tables = self.tables.read();
        let rows = tables
            .get(table)
            .ok_or_else(|| StorageError::TableNotFound(table.to_string()))?;

        let filter = scan.filter();
        let mut snapshot = Vec::new();
        for (key, row) in rows.iter() {
            if !scan.covers_row(key) {
                if scan.stop_row.as_deref().is_some_and(|stop| key.as_slice() >= stop) {
                    break;
                }
                continue;
            }
            let cells = filter.apply(Self::row_cells(row));
            if !cells.is_empty() {
                snapshot.push(StoredRow::new(key.clone(), cells));
            }
        }

        log::trace!("Memory scan on '{}' matched {} rows", table, snapshot.len());
        Ok(Box::new(snapshot.into_iter().map(Ok)))
    }

    fn put(&self, table: &str, put: &Put) -> Result<()> {
        if put.is_empty() {
            return Err(StorageError::InvalidRequest("put without cells".to_string()));
        }

        let mut tables = self.tables.write();
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| StorageError::TableNotFound(table.to_string()))?;

        let row = rows.entry(put.row().to_vec()).or_default();
        for cell in put.cells_at(now_millis()) {
            let (family, qualifier, ts, value) = cell.into_parts();
            row.insert((family, qualifier, Reverse(ts)), value);
        }
        Ok(())
    }

    fn delete_row(&self, table: &str, row: &[u8]) -> Result<()> {
        let mut tables = self.tables.write();
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| StorageError::TableNotFound(table.to_string()))?;
        rows.remove(row);
        Ok(())
    }

    fn table_exists(&self, table: &str) -> bool {
        self.tables.read().contains_key(table)
    }

    fn create_table(&self, table: &str) -> Result<()> {
        self.tables.write().entry(table.to_string()).or_default();
        Ok(())
    }
}
