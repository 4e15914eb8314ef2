// Default value functions

pub fn default_true() -> bool {
    true
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_data_path() -> String {
    "./data".to_string() // Default dev path; normalized to absolute at load time
}

pub fn default_codec_name() -> String {
    "text".to_string()
}

pub fn default_scan_batch_size() -> usize {
    100
}

pub fn default_rocksdb_write_buffer_size() -> usize {
    2 * 1024 * 1024 // 2MB per column family
}

pub fn default_rocksdb_max_write_buffers() -> i32 {
    2
}

pub fn default_rocksdb_block_cache_size() -> usize {
    8 * 1024 * 1024 // 8MB, shared across all column families
}

pub fn default_rocksdb_max_background_jobs() -> i32 {
    4
}

pub fn default_rocksdb_max_open_files() -> i32 {
    512 // Stays under typical OS limits
}

pub fn default_rocksdb_compact_on_startup() -> bool {
    false
}
