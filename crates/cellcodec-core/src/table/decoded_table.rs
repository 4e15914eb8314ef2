//! Decoded access to one table of a cell store.

use super::scan_session::ScanSession;
use crate::codec::CodecCatalog;
use crate::decoder::{DecodedRow, InclusionPolicy, RowDecoder};
use crate::error::Result;
use crate::registry::CodecRegistry;
use cellcodec_commons::{CodecError, TableConfig, Value};
use cellcodec_store::{now_millis, CellStore, Get, Put, Scan};
use std::sync::Arc;

/// A store table seen through a codec registry and an inclusion policy.
///
/// ## Example
///
/// ```rust
/// use cellcodec_commons::Value;
/// use cellcodec_core::DecodedTable;
/// use cellcodec_store::{CellStore, MemoryStore, Put, Scan};
/// use std::sync::Arc;
///
/// let store = Arc::new(MemoryStore::new());
/// store.create_table("metrics").unwrap();
/// store.put("metrics", &Put::new(b"r1".to_vec()).add_column_at(b"d", b"temp", 7, b"21.5")).unwrap();
///
/// let mut table = DecodedTable::new(store, "metrics");
/// table.set_include_family(false);
/// table.set_include_qualifier(false);
/// table.set_include_timestamp(false);
///
/// let row = table.get(b"r1").unwrap().unwrap();
/// assert_eq!(row.to_values(), vec![Value::from("r1"), Value::from("21.5")]);
///
/// let mut scan = table.open_scan(Scan::new()).unwrap();
/// assert_eq!(scan.next_batch(None).unwrap().len(), 1);
/// assert_eq!(scan.current_count(), 1);
/// ```
pub struct DecodedTable {
    store: Arc<dyn CellStore>,
    name: String,
    registry: CodecRegistry,
    policy: InclusionPolicy,
}

impl DecodedTable {
    /// Table with a default registry (text everywhere) and every part included.
    pub fn new(store: Arc<dyn CellStore>, name: impl Into<String>) -> Self {
        Self::with_registry(store, name, CodecRegistry::new(), InclusionPolicy::default())
    }

    pub fn with_registry(
        store: Arc<dyn CellStore>,
        name: impl Into<String>,
        registry: CodecRegistry,
        policy: InclusionPolicy,
    ) -> Self {
        Self {
            store,
            name: name.into(),
            registry,
            policy,
        }
    }

    /// Table configured from its `[[tables]]` entry.
    pub fn from_config(store: Arc<dyn CellStore>, config: &TableConfig, catalog: &CodecCatalog) -> Result<Self> {
        let registry = CodecRegistry::from_config(config, catalog)?;
        Ok(Self::with_registry(
            store,
            config.name.clone(),
            registry,
            InclusionPolicy::from(&config.include),
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store(&self) -> &Arc<dyn CellStore> {
        &self.store
    }

    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    /// Configuration access. Not available while a scan session is open.
    pub fn registry_mut(&mut self) -> &mut CodecRegistry {
        &mut self.registry
    }

    pub fn policy(&self) -> &InclusionPolicy {
        &self.policy
    }

    pub fn set_include_key(&mut self, include: bool) {
        self.policy.set_include_key(include);
    }

    pub fn set_include_family(&mut self, include: bool) {
        self.policy.set_include_family(include);
    }

    pub fn set_include_qualifier(&mut self, include: bool) {
        self.policy.set_include_qualifier(include);
    }

    pub fn set_include_timestamp(&mut self, include: bool) {
        self.policy.set_include_timestamp(include);
    }

    pub fn set_include_value(&mut self, include: bool) {
        self.policy.set_include_value(include);
    }

    pub fn decoder(&self) -> RowDecoder<'_> {
        RowDecoder::new(&self.registry, self.policy)
    }

    /// Fetches and decodes one row; `None` when the row is absent or empty.
    pub fn get(&self, row: &[u8]) -> Result<Option<DecodedRow>> {
        self.get_with(&Get::new(row.to_vec()))
    }

    pub fn get_with(&self, get: &Get) -> Result<Option<DecodedRow>> {
        let Some(stored) = self.store.get(&self.name, get)? else {
            return Ok(None);
        };
        if stored.is_empty() {
            return Ok(None);
        }
        let row = self.decoder().decode_row(stored.key(), stored.cells())?;
        Ok(Some(row))
    }

    /// Counts the rows of the table, fetching `batch_size` rows per round
    /// trip. Only the first cell of each row is read and nothing is cached.
    pub fn count(&self, batch_size: usize) -> Result<u64> {
        let scan = Scan::new()
            .with_cache_blocks(false)
            .with_first_key_only(true)
            .with_caching(batch_size.max(1));

        let mut count = 0u64;
        for row in self.store.scan(&self.name, &scan)? {
            row?;
            count += 1;
        }

        log::debug!("Counted {} rows in '{}'", count, self.name);
        Ok(count)
    }

    /// Opens a scan with its own cursor state.
    pub fn open_scan(&self, scan: Scan) -> Result<ScanSession<'_>> {
        let rows = self.store.scan(&self.name, &scan)?;
        log::debug!("Opened scan on '{}'", self.name);
        Ok(ScanSession::new(self, rows))
    }

    /// Writes raw cells.
    pub fn put(&self, put: &Put) -> Result<()> {
        self.store.put(&self.name, put)?;
        Ok(())
    }

    /// Encodes `values` with the value codec resolved for the cell, then
    /// writes it. Without a timestamp the store stamps the write time, and
    /// codec resolution uses the current time.
    pub fn put_encoded(
        &self,
        row: &[u8],
        family: &[u8],
        qualifier: &[u8],
        timestamp: Option<i64>,
        values: &[Value],
    ) -> Result<()> {
        let ts = timestamp.unwrap_or_else(now_millis);
        let codec = self.registry.resolve_value_codec(family, qualifier, ts);
        let bytes = codec.encode(values)?;
        self.put(&Put::new(row.to_vec()).add_column_at(family, qualifier, ts, bytes))
    }

    /// Decodes a key with the key codec.
    pub(crate) fn decode_key(&self, key: &[u8]) -> std::result::Result<Value, CodecError> {
        self.registry.resolve_key_codec().decode(key)
    }
}

impl std::fmt::Debug for DecodedTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedTable")
            .field("name", &self.name)
            .field("registry", &self.registry)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
