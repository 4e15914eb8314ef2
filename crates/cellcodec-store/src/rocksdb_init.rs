//! RocksDB initialization utilities for cellcodec.
//!
//! Opens (or creates) a database with one column family per configured table
//! and a block cache shared by every column family.

use crate::RocksDb;
use anyhow::{Context, Result};
use cellcodec_commons::config::RocksDbSettings;
use rocksdb::{BlockBasedOptions, Cache, ColumnFamilyDescriptor, Options};
use std::path::Path;
use std::sync::Arc;

/// Opens the cell database for a set of tables.
pub struct RocksDbInit {
    path: String,
    settings: RocksDbSettings,
}

impl RocksDbInit {
    pub fn new(path: impl Into<String>, settings: RocksDbSettings) -> Self {
        Self {
            path: path.into(),
            settings,
        }
    }

    pub fn with_defaults(path: impl Into<String>) -> Self {
        Self::new(path, RocksDbSettings::default())
    }

    /// Open or create the database, making sure every table in `tables` has
    /// a column family. Column families already on disk are opened too.
    pub fn open(&self, tables: &[&str]) -> Result<Arc<RocksDb>> {
        let cache = Cache::new_lru_cache(self.settings.block_cache_size);
        let db_opts = self.db_options(&cache);

        let families = self.column_families(&db_opts, tables);
        let descriptors = families
            .iter()
            .map(|name| ColumnFamilyDescriptor::new(name, self.table_options(&cache)));

        let db = RocksDb::open_cf_descriptors(&db_opts, Path::new(&self.path), descriptors)
            .with_context(|| format!("Failed to open RocksDB at {}", self.path))?;
        log::info!("Opened RocksDB at {} with tables {:?}", self.path, families);

        if self.settings.compact_on_startup {
            for name in &families {
                if let Some(cf) = db.cf_handle(name) {
                    db.compact_range_cf(&cf, None::<&[u8]>, None::<&[u8]>);
                }
            }
            log::debug!("Compacted {} column families", families.len());
        }

        Ok(Arc::new(db))
    }

    /// Families on disk (or just `default` for a new database) plus the
    /// requested tables.
    fn column_families(&self, db_opts: &Options, tables: &[&str]) -> Vec<String> {
        let mut families = RocksDb::list_cf(db_opts, &self.path)
            .ok()
            .filter(|found| !found.is_empty())
            .unwrap_or_else(|| vec![rocksdb::DEFAULT_COLUMN_FAMILY_NAME.to_string()]);
        for table in tables {
            if !families.iter().any(|name| name == table) {
                families.push((*table).to_string());
            }
        }
        families
    }

    fn db_options(&self, cache: &Cache) -> Options {
        let settings = &self.settings;
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.increase_parallelism(settings.max_background_jobs);
        opts.set_max_background_jobs(settings.max_background_jobs);
        opts.set_max_open_files(settings.max_open_files);
        opts.set_write_buffer_size(settings.write_buffer_size);
        opts.set_max_write_buffer_number(settings.max_write_buffers);
        opts.set_block_based_table_factory(&block_options(cache));
        opts
    }

    fn table_options(&self, cache: &Cache) -> Options {
        let mut opts = Options::default();
        opts.set_write_buffer_size(self.settings.write_buffer_size);
        opts.set_max_write_buffer_number(self.settings.max_write_buffers);
        opts.set_block_based_table_factory(&block_options(cache));
        opts
    }
}

/// Bloom filters and index blocks live in the shared cache.
fn block_options(cache: &Cache) -> BlockBasedOptions {
    let mut opts = BlockBasedOptions::default();
    opts.set_block_cache(cache);
    opts.set_bloom_filter(10.0, false);
    opts.set_cache_index_and_filter_blocks(true);
    opts.set_pin_l0_filter_and_index_blocks_in_cache(true);
    opts
}
