//! Store client abstraction for column-family cell stores.
//!
//! This module provides the narrow interface the decoding layer consumes. A
//! store holds tables; a table holds rows; a row is a key plus a list of
//! cells `(family, qualifier, timestamp, value)`.
//!
//! ## Architecture
//!
//! ```text
//! cellcodec-core (codec resolution, row decoding)
//!     ↓
//! CellStore                ← get / scan / put (this file)
//!     ↓
//! MemoryStore | RocksDbCellStore
//! ```
//!
//! ## Cell Ordering
//!
//! Every backend returns the cells of a row ordered by family ascending, then
//! qualifier ascending, then timestamp descending (newest version first).
//! Rows from a scan are ordered by row key ascending.
//!
//! ## Example Usage
//!
//! ```rust
//! use cellcodec_store::{CellStore, Get, MemoryStore, Put};
//!
//! let store = MemoryStore::new();
//! store.create_table("metrics").unwrap();
//! store
//!     .put("metrics", &Put::new(b"row-1".to_vec()).add_column_at(b"d", b"temp", 100, b"21.5"))
//!     .unwrap();
//!
//! let row = store.get("metrics", &Get::new(b"row-1".to_vec())).unwrap().unwrap();
//! assert_eq!(row.cells().len(), 1);
//! ```

use cellcodec_commons::Cell;
use std::fmt;

use crate::query::{Get, Put, Scan};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Table (column family in RocksDB) not found
    TableNotFound(String),

    /// Generic I/O error from underlying storage
    IoError(String),

    /// A stored key or value could not be decoded
    SerializationError(String),

    /// Request rejected before reaching the storage engine
    InvalidRequest(String),

    /// Other errors
    Other(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::TableNotFound(t) => write!(f, "Table not found: {}", t),
            StorageError::IoError(msg) => write!(f, "I/O error: {}", msg),
            StorageError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            StorageError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            StorageError::Other(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// One stored row: its key and its cells in store order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRow {
    key: Vec<u8>,
    cells: Vec<Cell>,
}

impl StoredRow {
    pub fn new(key: Vec<u8>, cells: Vec<Cell>) -> Self {
        Self { key, cells }
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// A row without cells is reported as absent by `get`.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn into_parts(self) -> (Vec<u8>, Vec<Cell>) {
        (self.key, self.cells)
    }
}

/// Iterator returned by [`CellStore::scan`]. Storage failures surface as
/// `Err` items; the iterator ends after the last row.
pub type RowIterator<'a> = Box<dyn Iterator<Item = Result<StoredRow>> + 'a>;

/// Trait for pluggable cell store implementations.
///
/// Implementations must be thread-safe (Send + Sync). Every call blocks the
/// caller until the underlying engine answers; retries and timeouts, if any,
/// belong to the implementation.
pub trait CellStore: Send + Sync {
    /// Fetches one row.
    ///
    /// Returns `Ok(None)` if the row doesn't exist or no cell survives the
    /// request's filters.
    fn get(&self, table: &str, get: &Get) -> Result<Option<StoredRow>>;

    /// Opens a scan over a table.
    ///
    /// The iterator observes the table as of the moment the scan was opened.
    /// Rows with no cell left after filtering are skipped.
    fn scan(&self, table: &str, scan: &Scan) -> Result<RowIterator<'_>>;

    /// Writes the cells of a put. Cells without a timestamp are stamped with
    /// the current time in milliseconds.
    fn put(&self, table: &str, put: &Put) -> Result<()>;

    /// Deletes every cell of a row. Idempotent.
    fn delete_row(&self, table: &str, row: &[u8]) -> Result<()>;

    /// Checks if a table exists.
    fn table_exists(&self, table: &str) -> bool;

    /// Creates a new table.
    ///
    /// Returns `Ok(())` if the table already exists (idempotent).
    fn create_table(&self, table: &str) -> Result<()>;
}
