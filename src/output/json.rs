//! JSON report output writer.
//!
//! Writes CostReport structs to JSON files with proper formatting.

use super::{create_parent_dirs, validate_path};
use crate::parser::schema::CostReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `report` - Report data to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &CostReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    validate_path(output_path)?;
    create_parent_dirs(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;

    let writer = BufWriter::new(file);

    // Serialize to JSON with pretty printing
    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    info!(
        "Report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Serialize a report to a pretty JSON string
pub fn report_to_string(report: &CostReport) -> Result<String, OutputError> {
    serde_json::to_string_pretty(report).map_err(OutputError::SerializationFailed)
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a report from a JSON file
///
/// **Public** - used by the validate command and tests
///
/// # Errors
/// * `OutputError::ReadFailed` - File cannot be opened
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<CostReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::ReadFailed)?;

    let report: CostReport =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, {} rows",
        report.version,
        report.rows.len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten;
    use crate::tree::BuildError;
    use crate::parser::schema::RecordId;
    use tempfile::NamedTempFile;

    fn create_test_report() -> CostReport {
        CostReport {
            version: "1.0.0".to_string(),
            title: "March".to_string(),
            record_count: 0,
            grand_total: 0.0,
            errors: vec![BuildError::DuplicateId { id: RecordId::Int(1) }],
            rows: flatten(&[]),
            generated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_write_and_read_report() {
        let report = create_test_report();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_report(&report, path).unwrap();
        let loaded = read_report(path).unwrap();

        assert_eq!(loaded.version, report.version);
        assert_eq!(loaded.title, report.title);
        assert_eq!(loaded.rows, report.rows);
        assert_eq!(loaded.errors, report.errors);
    }

    #[test]
    fn test_report_to_string() {
        let text = report_to_string(&create_test_report()).unwrap();
        assert!(text.contains("\"hierarchical_number\": \"TOTAL\""));
        assert!(text.contains("\"kind\": \"duplicate_id\""));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.json");

        write_report(&create_test_report(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = read_report(temp_dir.path().join("absent.json"));
        assert!(matches!(result, Err(OutputError::ReadFailed(_))));
    }
}
