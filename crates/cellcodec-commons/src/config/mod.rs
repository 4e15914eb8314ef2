//! Configuration types and loader for cellcodec.

pub mod defaults;
mod loader;
mod types;

pub use types::*;
