use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cellcodec - decode column-family rows through configured codecs
#[derive(Parser, Debug)]
#[command(name = "cellcodec")]
#[command(version)]
#[command(about = "Read and write cellcodec tables as JSON", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long = "config", default_value = "cellcodec.toml")]
    pub config: PathBuf,

    /// Table to operate on (must be listed in the configuration)
    #[arg(short = 't', long = "table")]
    pub table: String,

    /// Pretty-print JSON output
    #[arg(long = "pretty")]
    pub pretty: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print one decoded row
    Get {
        /// Row key (binary-escaped, e.g. "user\x00001")
        row: String,
    },

    /// Print decoded rows of a key range
    Scan {
        /// Inclusive start row
        #[arg(long)]
        start: Option<String>,

        /// Exclusive stop row
        #[arg(long)]
        stop: Option<String>,

        /// Maximum number of rows to print
        #[arg(long)]
        limit: Option<usize>,

        /// Rows decoded per batch (default: store.scan_batch_size)
        #[arg(long)]
        batch: Option<usize>,
    },

    /// Count the rows of the table
    Count {
        /// Rows fetched per round trip (default: store.scan_batch_size)
        #[arg(long = "batch-size")]
        batch_size: Option<usize>,
    },

    /// Encode a value with the resolved codec and write it
    Put {
        row: String,
        family: String,
        qualifier: String,

        /// JSON value (a top-level array supplies several values); input
        /// that isn't valid JSON is written as text
        value: String,

        /// Cell timestamp in milliseconds (default: now)
        #[arg(long, allow_hyphen_values = true)]
        timestamp: Option<i64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_get() {
        let cli = Cli::try_parse_from(["cellcodec", "--table", "metrics", "get", "row-1"]).unwrap();
        assert_eq!(cli.table, "metrics");
        assert_eq!(cli.config, PathBuf::from("cellcodec.toml"));
        assert!(!cli.pretty);
        assert_eq!(cli.command, Command::Get { row: "row-1".to_string() });
    }

    #[test]
    fn test_parse_scan() {
        let cli = Cli::try_parse_from([
            "cellcodec", "-c", "/etc/cc.toml", "-t", "m", "--pretty", "-v", "scan", "--start", "a", "--limit", "10",
        ])
        .unwrap();
        assert!(cli.pretty);
        assert!(cli.verbose);
        assert_eq!(
            cli.command,
            Command::Scan {
                start: Some("a".to_string()),
                stop: None,
                limit: Some(10),
                batch: None,
            }
        );
    }

    #[test]
    fn test_parse_count_and_put() {
        let cli = Cli::try_parse_from(["cellcodec", "-t", "m", "count", "--batch-size", "500"]).unwrap();
        assert_eq!(cli.command, Command::Count { batch_size: Some(500) });

        let cli = Cli::try_parse_from([
            "cellcodec", "-t", "m", "put", "r", "d", "temp", "[1, 2]", "--timestamp", "-5",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Command::Put {
                row: "r".to_string(),
                family: "d".to_string(),
                qualifier: "temp".to_string(),
                value: "[1, 2]".to_string(),
                timestamp: Some(-5),
            }
        );
    }

    #[test]
    fn test_table_is_required() {
        assert!(Cli::try_parse_from(["cellcodec", "get", "r"]).is_err());
    }
}
