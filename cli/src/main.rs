//! cellcodec - command-line access to decoded tables.
//!
//! ```text
//! cellcodec -t metrics get sensor-1
//! cellcodec -t metrics --pretty scan --start sensor-1 --limit 10
//! cellcodec -t metrics count
//! cellcodec -t metrics put sensor-1 d temp '[21.5]'
//! ```

use cellcodec_cli::commands::{self, ScanOptions};
use cellcodec_cli::{Cli, CliError, Command, Result};
use cellcodec_commons::CellCodecConfig;
use cellcodec_core::{CodecCatalog, DecodedTable};
use cellcodec_store::{RocksDbCellStore, RocksDbInit};
use clap::Parser;
use log::LevelFilter;
use std::str::FromStr;
use std::sync::Arc;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = CellCodecConfig::from_file(&cli.config).map_err(CliError::configuration)?;
    init_logging(&config, cli.verbose);

    let table_config = config.table(&cli.table).ok_or_else(|| {
        CliError::ConfigurationError(format!(
            "Table '{}' is not configured in {}",
            cli.table,
            cli.config.display()
        ))
    })?;

    let db = RocksDbInit::new(config.store.data_path.clone(), config.store.rocksdb.clone())
        .open(&config.table_names())
        .map_err(|e| CliError::StoreError(format!("{:#}", e)))?;
    let store = Arc::new(RocksDbCellStore::new(db));
    let table = DecodedTable::from_config(store, table_config, &CodecCatalog::new())?;

    let batch_default = config.store.scan_batch_size;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Get { row } => commands::get(&table, &row, &mut out, cli.pretty),
        Command::Scan {
            start,
            stop,
            limit,
            batch,
        } => {
            let options = ScanOptions {
                start,
                stop,
                limit,
                batch: batch.unwrap_or(batch_default),
            };
            commands::scan(&table, &options, &mut out, cli.pretty).map(|_| ())
        },
        Command::Count { batch_size } => {
            commands::count(&table, batch_size.unwrap_or(batch_default), &mut out).map(|_| ())
        },
        Command::Put {
            row,
            family,
            qualifier,
            value,
            timestamp,
        } => commands::put(&table, &row, &family, &qualifier, &value, timestamp),
    }
}

/// Logs go to stderr so stdout stays valid JSON.
fn init_logging(config: &CellCodecConfig, verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::from_str(&config.logging.level).unwrap_or(LevelFilter::Info)
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    for (target, target_level) in &config.logging.targets {
        if let Ok(target_level) = LevelFilter::from_str(target_level) {
            builder.filter_module(target, target_level);
        }
    }
    builder.target(env_logger::Target::Stderr);
    builder.parse_default_env();
    let _ = builder.try_init();
}
