//! Output writers for report data.
//!
//! This module handles writing data to disk in various formats:
//! - JSON reports (pretty)
//! - CSV rows for spreadsheets

pub mod csv;
pub mod json;

// Re-export main functions
pub use self::csv::{rows_to_csv, write_csv, write_rows, CSV_HEADERS};
pub use self::json::{read_report, report_to_string, write_report};

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

/// Validate that an output path is writable
///
/// **Public** - shared by every writer
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create missing parent directories of an output path
fn create_parent_dirs(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path_empty() {
        assert!(validate_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_path(temp_dir.path()).is_err());
    }
}
