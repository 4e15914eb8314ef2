//! # cellcodec-store
//!
//! Column-family cell store abstraction. This crate isolates all direct
//! RocksDB interactions, allowing cellcodec-core to stay free of RocksDB
//! dependencies.
//!
//! ## Architecture
//!
//! ```text
//! cellcodec-core (decoding, codec registries)
//!     ↓
//! cellcodec-store (get / scan / put of raw cells)
//!     ↓
//! MemoryStore | RocksDB (one column family per table)
//! ```

pub mod key_encoding;
pub mod memory_impl;
pub mod query;
pub mod rocksdb_impl;
pub mod rocksdb_init;
pub mod storage_trait;

// Make test_utils available for testing in dependent crates
pub mod test_utils;

/// RocksDB handle used by the store. Multi-threaded mode lets column
/// families be created through a shared reference.
pub type RocksDb = rocksdb::DBWithThreadMode<rocksdb::MultiThreaded>;

pub use memory_impl::MemoryStore;
pub use query::{now_millis, Get, Put, Scan, TimeRange};
pub use rocksdb_impl::RocksDbCellStore;
pub use rocksdb_init::RocksDbInit;
pub use storage_trait::{CellStore, Result, RowIterator, StorageError, StoredRow};
