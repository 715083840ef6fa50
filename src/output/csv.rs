//! Spreadsheet-shaped CSV output of export rows.
//!
//! Column order: sequence number, name, category, amount, percentage,
//! level marker, date. The total row is whatever the row sequence ends with;
//! this writer does not reorder anything.

use super::{create_parent_dirs, validate_path};
use crate::parser::schema::ExportRow;
use crate::utils::error::OutputError;
use csv::Writer;
use log::info;
use std::io::Write;
use std::path::Path;

/// Column headers, in output order
pub const CSV_HEADERS: [&str; 7] = ["No.", "Name", "Category", "Amount", "Percentage", "Level", "Date"];

/// Write rows as CSV into any writer
///
/// **Public** - core of both file and in-memory export
pub fn write_rows<W: Write>(rows: &[ExportRow], writer: W) -> Result<(), OutputError> {
    let mut wtr = Writer::from_writer(writer);

    wtr.write_record(CSV_HEADERS)?;

    for row in rows {
        let amount = row.amount.to_string();
        wtr.write_record([
            row.hierarchical_number.as_str(),
            row.label.as_str(),
            row.category_label.as_str(),
            amount.as_str(),
            row.percentage_display.as_str(),
            row.level_marker.as_str(),
            row.date_display.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Render rows as a CSV string
pub fn rows_to_csv(rows: &[ExportRow]) -> Result<String, OutputError> {
    let mut buffer = Vec::new();
    write_rows(rows, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| OutputError::Encoding(format!("CSV output is not UTF-8: {}", e)))
}

/// Write rows to a CSV file
///
/// **Public** - main entry point for spreadsheet export
pub fn write_csv(rows: &[ExportRow], output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing {} rows to: {}", rows.len(), output_path.display());

    validate_path(output_path)?;
    create_parent_dirs(output_path)?;

    let file = std::fs::File::create(output_path).map_err(OutputError::WriteFailed)?;
    write_rows(rows, std::io::BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::annotate;
    use crate::flatten::flatten;
    use crate::parser::schema::CostRecord;
    use crate::tree::build_tree;

    fn sample_rows() -> Vec<ExportRow> {
        let records = vec![
            CostRecord::new(1, 1500.5, "Office, rent").with_category("Fixed"),
            CostRecord::new(2, 500.0, "Deposit").with_parent(1),
        ];
        let mut forest = build_tree(&records);
        annotate(&mut forest.roots);
        flatten(&forest.roots)
    }

    #[test]
    fn test_csv_export_empty() {
        let result = rows_to_csv(&[]).unwrap();

        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], "No.,Name,Category,Amount,Percentage,Level,Date");
    }

    #[test]
    fn test_csv_export_rows() {
        let result = rows_to_csv(&sample_rows()).unwrap();

        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 4); // header + 2 items + total
        assert_eq!(lines[1], "1,\"Office, rent\",Fixed,1500.5,100.0%,1,");
        assert!(lines[3].starts_with("TOTAL,Total,"));
    }

    #[test]
    fn test_csv_export_valid_format() {
        let result = rows_to_csv(&sample_rows()).unwrap();

        let mut reader = csv::Reader::from_reader(result.as_bytes());
        assert_eq!(reader.headers().unwrap().len(), 7);
        assert_eq!(reader.records().count(), 3);
    }

    #[test]
    fn test_write_csv_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out/rows.csv");

        write_csv(&sample_rows(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("1.1,Deposit,-,500,"));
    }
}
