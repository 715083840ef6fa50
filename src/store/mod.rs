//! Sources of raw cost records.
//!
//! The engine never fetches anything itself; these helpers produce the raw
//! JSON snapshot that [`crate::parser::parse_records`] adapts.

pub mod client;
pub mod file;

pub use client::RecordsClient;
pub use file::read_records_file;
