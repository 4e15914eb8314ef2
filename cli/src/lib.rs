//! # cellcodec-cli
//!
//! Library side of the `cellcodec` binary: argument parsing, command
//! implementations, JSON output and error types.

pub mod args;
pub mod commands;
pub mod error;
pub mod formatter;

pub use args::{Cli, Command};
pub use commands::ScanOptions;
pub use error::{CliError, Result};
