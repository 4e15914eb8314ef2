use super::defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main cellcodec configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CellCodecConfig {
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub store: StoreSettings,
    /// Per-table codec configuration
    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

impl CellCodecConfig {
    /// Find the configuration of a table by name.
    pub fn table(&self, name: &str) -> Option<&TableConfig> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Names of all configured tables, in file order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional per-target log level overrides
    /// [logging.targets]
    /// rocksdb = "warn"
    #[serde(default)]
    pub targets: HashMap<String, String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            targets: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Directory holding the RocksDB files (default: "./data")
    #[serde(default = "default_data_path")]
    pub data_path: String,
    /// Rows fetched per round trip by scans that don't set their own caching
    #[serde(default = "default_scan_batch_size")]
    pub scan_batch_size: usize,
    #[serde(default)]
    pub rocksdb: RocksDbSettings,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            scan_batch_size: default_scan_batch_size(),
            rocksdb: RocksDbSettings::default(),
        }
    }
}

/// RocksDB-specific settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocksDbSettings {
    /// Write buffer size per column family in bytes (default: 2MB)
    #[serde(default = "default_rocksdb_write_buffer_size")]
    pub write_buffer_size: usize,

    /// Maximum number of write buffers (default: 2)
    #[serde(default = "default_rocksdb_max_write_buffers")]
    pub max_write_buffers: i32,

    /// Block cache size for reads in bytes (default: 8MB, SHARED across all CFs)
    #[serde(default = "default_rocksdb_block_cache_size")]
    pub block_cache_size: usize,

    /// Maximum number of background jobs (default: 4)
    #[serde(default = "default_rocksdb_max_background_jobs")]
    pub max_background_jobs: i32,

    /// Maximum number of open files RocksDB can keep open (default: 512)
    /// Set to -1 for unlimited.
    #[serde(default = "default_rocksdb_max_open_files")]
    pub max_open_files: i32,

    /// Compact all column families on startup (default: false)
    #[serde(default = "default_rocksdb_compact_on_startup")]
    pub compact_on_startup: bool,
}

impl Default for RocksDbSettings {
    fn default() -> Self {
        Self {
            write_buffer_size: default_rocksdb_write_buffer_size(),
            max_write_buffers: default_rocksdb_max_write_buffers(),
            block_cache_size: default_rocksdb_block_cache_size(),
            max_background_jobs: default_rocksdb_max_background_jobs(),
            max_open_files: default_rocksdb_max_open_files(),
            compact_on_startup: default_rocksdb_compact_on_startup(),
        }
    }
}

/// Codec configuration of one table.
///
/// Codec fields hold names from the codec catalog ("text", "typed_bytes",
/// "typed_bytes_single", or any custom registration). Families and qualifiers
/// are binary-escaped text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub name: String,
    #[serde(default = "default_codec_name")]
    pub default_codec: String,
    #[serde(default)]
    pub key_codec: Option<String>,
    #[serde(default)]
    pub family_codec: Option<String>,
    /// family -> codec used for the qualifiers of that family
    #[serde(default)]
    pub qualifier_codecs: HashMap<String, String>,
    #[serde(default)]
    pub fields: Vec<FieldCodecConfig>,
    #[serde(default)]
    pub include: IncludeConfig,
}

impl TableConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_codec: default_codec_name(),
            key_codec: None,
            family_codec: None,
            qualifier_codecs: HashMap::new(),
            fields: Vec::new(),
            include: IncludeConfig::default(),
        }
    }
}

/// Value codec for one field, optionally scoped to `[start, stop)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCodecConfig {
    pub family: String,
    /// Omitted = every qualifier of the family
    #[serde(default)]
    pub qualifier: Option<String>,
    pub codec: String,
    #[serde(default)]
    pub start: Option<i64>,
    #[serde(default)]
    pub stop: Option<i64>,
}

impl FieldCodecConfig {
    /// The validity window, when both bounds are set.
    pub fn interval(&self) -> Option<(i64, i64)> {
        match (self.start, self.stop) {
            (Some(start), Some(stop)) => Some((start, stop)),
            _ => None,
        }
    }
}

/// Which parts of each row are returned after decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeConfig {
    #[serde(default = "default_true")]
    pub key: bool,
    #[serde(default = "default_true")]
    pub family: bool,
    #[serde(default = "default_true")]
    pub qualifier: bool,
    #[serde(default = "default_true")]
    pub timestamp: bool,
    #[serde(default = "default_true")]
    pub value: bool,
}

impl Default for IncludeConfig {
    fn default() -> Self {
        Self {
            key: true,
            family: true,
            qualifier: true,
            timestamp: true,
            value: true,
        }
    }
}
