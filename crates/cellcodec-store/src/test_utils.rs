//! Temporary RocksDB databases for tests.

use crate::{RocksDb, RocksDbCellStore};
use rocksdb::Options;
use std::sync::Arc;
use tempfile::TempDir;

/// A RocksDB database in a temporary directory, removed on drop.
pub struct TestDb {
    pub db: Arc<RocksDb>,
    // Keeps the directory alive as long as the database
    _dir: TempDir,
}

impl TestDb {
    /// Database with one column family per table.
    ///
    /// ```no_run
    /// use cellcodec_store::test_utils::TestDb;
    /// use cellcodec_store::CellStore;
    ///
    /// let test_db = TestDb::new(&["metrics"]).unwrap();
    /// assert!(test_db.store().table_exists("metrics"));
    /// ```
    pub fn new(tables: &[&str]) -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        let db = RocksDb::open_cf(&opts, dir.path(), tables)?;

        Ok(Self {
            db: Arc::new(db),
            _dir: dir,
        })
    }

    pub fn store(&self) -> RocksDbCellStore {
        RocksDbCellStore::new(Arc::clone(&self.db))
    }
}
