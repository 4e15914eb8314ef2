//! RocksDB implementation of the CellStore trait.
//!
//! Each table maps to one RocksDB column family. Every cell version is one
//! key/value pair, keyed as described in [`crate::key_encoding`], so a forward
//! iteration yields cells already grouped by row and in store order.

use crate::key_encoding::{cell_key, parse_cell_key, row_end, row_prefix};
use crate::query::{now_millis, Get, Put, Scan};
use crate::storage_trait::{CellStore, Result, RowIterator, StorageError, StoredRow};
use crate::RocksDb;
use cellcodec_commons::Cell;
use rocksdb::{
    BoundColumnFamily, DBIteratorWithThreadMode, Direction, IteratorMode, Options, ReadOptions,
    SnapshotWithThreadMode, WriteBatch,
};
use std::sync::Arc;

/// RocksDB-backed cell store.
///
/// ## Example
///
/// ```rust,ignore
/// use cellcodec_store::{CellStore, Get, Put, RocksDbCellStore, RocksDbInit};
///
/// let db = RocksDbInit::with_defaults("/tmp/cells.db").open(&["metrics"]).unwrap();
/// let store = RocksDbCellStore::new(db);
///
/// store.put("metrics", &Put::new(b"r1".to_vec()).add_column(b"d", b"temp", b"21.5")).unwrap();
/// let row = store.get("metrics", &Get::new(b"r1".to_vec())).unwrap();
/// assert!(row.is_some());
/// ```
pub struct RocksDbCellStore {
    db: Arc<RocksDb>,
}

impl RocksDbCellStore {
    pub fn new(db: Arc<RocksDb>) -> Self {
        Self { db }
    }

    /// Returns a reference to the underlying database.
    pub fn db(&self) -> &Arc<RocksDb> {
        &self.db
    }

    fn get_cf(&self, table: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(table)
            .ok_or_else(|| StorageError::TableNotFound(table.to_string()))
    }

    fn row_groups(&self, table: &str, scan: &Scan) -> Result<RowGroupingIter<'_>> {
        let cf = self.get_cf(table)?;

        // Take a consistent snapshot for the duration of the iterator
        let snapshot = self.db.snapshot();

        let mut readopts = ReadOptions::default();
        readopts.set_snapshot(&snapshot);
        readopts.fill_cache(scan.cache_blocks);
        if let Some(stop) = &scan.stop_row {
            readopts.set_iterate_upper_bound(row_prefix(stop));
        }

        let start = scan.start_row.as_deref().map(row_prefix);
        let mode = match &start {
            Some(start) => IteratorMode::From(start.as_slice(), Direction::Forward),
            None => IteratorMode::Start,
        };
        let inner = self.db.iterator_cf_opt(&cf, readopts, mode);

        log::trace!(
            "RocksDB scan on '{}' (cache_blocks={}, first_key_only={})",
            table,
            scan.cache_blocks,
            scan.first_key_only
        );

        Ok(RowGroupingIter {
            inner,
            _snapshot: snapshot,
            scan: scan.clone(),
            pending: None,
            exhausted: false,
        })
    }
}

fn io_error(e: rocksdb::Error) -> StorageError {
    StorageError::IoError(e.to_string())
}

fn key_error(e: anyhow::Error) -> StorageError {
    StorageError::SerializationError(format!("{:#}", e))
}

impl CellStore for RocksDbCellStore {
    fn get(&self, table: &str, get: &Get) -> Result<Option<StoredRow>> {
        let cf = self.get_cf(table)?;
        let prefix = row_prefix(&get.row);
        let filter = get.filter();

        let mut cells = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::From(&prefix, Direction::Forward)) {
            let (key, value) = item.map_err(io_error)?;
            if !key.starts_with(&prefix) {
                break;
            }
            let (_, family, qualifier, ts) = parse_cell_key(&key).map_err(key_error)?;
            if filter.wants_family(&family) {
                cells.push(Cell::new(family, qualifier, ts, value.into_vec()));
            }
        }

        let cells = filter.apply(cells);
        if cells.is_empty() {
            return Ok(None);
        }
        Ok(Some(StoredRow::new(get.row.clone(), cells)))
    }

    fn scan(&self, table: &str, scan: &Scan) -> Result<RowIterator<'_>> {
        Ok(Box::new(self.row_groups(table, scan)?))
    }

    fn put(&self, table: &str, put: &Put) -> Result<()> {
        if put.is_empty() {
            return Err(StorageError::InvalidRequest("put without cells".to_string()));
        }

        let cf = self.get_cf(table)?;
        let mut batch = WriteBatch::default();
        for cell in put.cells_at(now_millis()) {
            let key = cell_key(put.row(), cell.family(), cell.qualifier(), cell.timestamp());
            batch.put_cf(&cf, key, cell.value());
        }
        self.db.write(batch).map_err(io_error)
    }

    fn delete_row(&self, table: &str, row: &[u8]) -> Result<()> {
        let cf = self.get_cf(table)?;
        let prefix = row_prefix(row);

        let mut batch = WriteBatch::default();
        for item in self.db.iterator_cf(&cf, IteratorMode::From(&prefix, Direction::Forward)) {
            let (key, _) = item.map_err(io_error)?;
            if !key.starts_with(&prefix) {
                break;
            }
            batch.delete_cf(&cf, key);
        }
        self.db.write(batch).map_err(io_error)
    }

    fn table_exists(&self, table: &str) -> bool {
        self.db.cf_handle(table).is_some()
    }

    fn create_table(&self, table: &str) -> Result<()> {
        if self.table_exists(table) {
            return Ok(());
        }

        let opts = Options::default();
        match self.db.create_cf(table, &opts) {
            Ok(()) => {
                log::debug!("Created column family '{}'", table);
                Ok(())
            },
            // Another thread created it first
            Err(_) if self.table_exists(table) => Ok(()),
            Err(e) => Err(io_error(e)),
        }
    }
}

/// Folds consecutive cell keys of the same row into one `StoredRow`.
struct RowGroupingIter<'a> {
    inner: DBIteratorWithThreadMode<'a, RocksDb>,
    // Dropped after `inner`
    _snapshot: SnapshotWithThreadMode<'a, RocksDb>,
    scan: Scan,
    pending: Option<(Vec<u8>, Vec<Cell>)>,
    exhausted: bool,
}

impl RowGroupingIter<'_> {
    fn finish(&self, key: Vec<u8>, cells: Vec<Cell>) -> Option<StoredRow> {
        let cells = self.scan.filter().apply(cells);
        (!cells.is_empty()).then(|| StoredRow::new(key, cells))
    }

    fn fail(&mut self, err: StorageError) -> Option<Result<StoredRow>> {
        self.exhausted = true;
        self.pending = None;
        Some(Err(err))
    }
}

impl Iterator for RowGroupingIter<'_> {
    type Item = Result<StoredRow>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.exhausted {
                let (key, cells) = self.pending.take()?;
                return self.finish(key, cells).map(Ok);
            }

            let (key, value) = match self.inner.next() {
                None => {
                    self.exhausted = true;
                    continue;
                },
                Some(Ok(kv)) => kv,
                Some(Err(e)) => return self.fail(io_error(e)),
            };

            let (row, family, qualifier, ts) = match parse_cell_key(&key) {
                Ok(parts) => parts,
                Err(e) => return self.fail(key_error(e)),
            };

            let same_row = self.pending.as_ref().is_some_and(|(current, _)| *current == row);
            let filter = self.scan.filter();
            let accepted = filter.accepts(&family, ts);
            // The rest of the row is never read once its first cell is taken
            let skip_to = (accepted && filter.first_key_only()).then(|| row_end(&row));

            // A new row key flushes the previous row, even if this cell is filtered out
            let finished = if same_row {
                None
            } else {
                self.pending.replace((row, Vec::new()))
            };

            if accepted {
                if let Some((_, cells)) = self.pending.as_mut() {
                    cells.push(Cell::new(family, qualifier, ts, value.into_vec()));
                }
            }
            if let Some(target) = skip_to {
                self.inner.set_mode(IteratorMode::From(target.as_slice(), Direction::Forward));
            }

            if let Some(done) = finished.and_then(|(k, c)| self.finish(k, c)) {
                return Some(Ok(done));
            }
        }
    }
}
