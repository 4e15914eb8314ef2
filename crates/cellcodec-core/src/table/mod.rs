//! Row source adapter: decoded get / scan / count over a cell store.

mod decoded_table;
mod scan_session;

pub use decoded_table::DecodedTable;
pub use scan_session::ScanSession;
