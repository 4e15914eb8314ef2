use super::types::CellCodecConfig;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

impl CellCodecConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let config = Self::from_toml_str(&content)?;
        log::debug!(
            "Loaded configuration from {} ({} tables)",
            path.as_ref().display(),
            config.tables.len()
        );
        Ok(config)
    }

    /// Parse configuration from TOML text, then finalize it.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let mut config: CellCodecConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        config.finalize()?;

        Ok(config)
    }

    /// Normalize local filesystem paths and validate configuration.
    pub fn finalize(&mut self) -> anyhow::Result<()> {
        self.store.data_path = normalize_dir_path(&self.store.data_path);

        self.validate()?;

        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                VALID_LOG_LEVELS.join(", ")
            ));
        }

        for (target, level) in &self.logging.targets {
            if !VALID_LOG_LEVELS.contains(&level.as_str()) {
                return Err(anyhow::anyhow!(
                    "Invalid log level '{}' for target '{}'. Must be one of: {}",
                    level,
                    target,
                    VALID_LOG_LEVELS.join(", ")
                ));
            }
        }

        if self.store.scan_batch_size == 0 {
            return Err(anyhow::anyhow!("store.scan_batch_size must be greater than 0"));
        }

        let mut seen = HashSet::new();
        for table in &self.tables {
            if table.name.trim().is_empty() {
                return Err(anyhow::anyhow!("Table name cannot be empty"));
            }
            if !seen.insert(table.name.as_str()) {
                return Err(anyhow::anyhow!("Duplicate table '{}'", table.name));
            }

            for field in &table.fields {
                match (field.start, field.stop) {
                    (Some(start), Some(stop)) if stop < start => {
                        return Err(anyhow::anyhow!(
                            "Invalid interval [{}, {}) for {}:{} in table '{}'",
                            start,
                            stop,
                            field.family,
                            field.qualifier.as_deref().unwrap_or("*"),
                            table.name
                        ));
                    },
                    (Some(_), None) | (None, Some(_)) => {
                        return Err(anyhow::anyhow!(
                            "Field {}:{} in table '{}' must set both start and stop, or neither",
                            field.family,
                            field.qualifier.as_deref().unwrap_or("*"),
                            table.name
                        ));
                    },
                    _ => {},
                }
            }
        }

        Ok(())
    }
}

/// Resolve a relative directory against the current working directory.
fn normalize_dir_path(path: &str) -> String {
    let p = PathBuf::from(path);
    if p.is_absolute() {
        return path.to_string();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(p).to_string_lossy().into_owned(),
        Err(_) => path.to_string(),
    }
}
