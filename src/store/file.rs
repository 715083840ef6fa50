//! Load raw cost records from a JSON file on disk.

use crate::utils::error::StoreError;
use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read a raw record payload from a JSON file
///
/// **Public** - file-backed counterpart of the HTTP client
pub fn read_records_file(path: impl AsRef<Path>) -> Result<serde_json::Value, StoreError> {
    let path = path.as_ref();
    debug!("Reading records from: {}", path.display());

    let file = File::open(path)?;
    let raw = serde_json::from_reader(BufReader::new(file))?;
    Ok(raw)
}
