use cost_tree::commands::generate_report;
use cost_tree::output::{read_report, rows_to_csv, validate_path, write_csv, write_report};
use cost_tree::parser::CostRecord;
use std::path::Path;
use tempfile::NamedTempFile;

fn sample_records() -> Vec<CostRecord> {
    vec![
        CostRecord::new(1, 800.0, "Rent").with_category("Fixed"),
        CostRecord::new(2, 200.0, "Utilities").with_category("Variable"),
        CostRecord::new(3, 150.0, "Electricity").with_parent(2),
    ]
}

#[test]
fn test_write_and_read_report() {
    let (report, _) = generate_report(&sample_records(), "April");
    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    write_report(&report, path).unwrap();
    let loaded = read_report(path).unwrap();

    assert_eq!(loaded.title, "April");
    assert_eq!(loaded.rows, report.rows);
    assert_eq!(loaded.grand_total, 1000.0);
}

#[test]
fn test_validate_output_path_empty() {
    assert!(validate_path(Path::new("")).is_err());
}

#[test]
fn test_csv_columns() {
    let (report, _) = generate_report(&sample_records(), "April");
    let csv = rows_to_csv(&report.rows).unwrap();

    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(
        headers,
        vec!["No.", "Name", "Category", "Amount", "Percentage", "Level", "Date"]
    );

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 4);
    assert_eq!(&records[2][0], "2.1");
    assert_eq!(&records[2][5], "2.1");
    assert_eq!(&records[3][0], "TOTAL");
    assert_eq!(&records[3][3], "1000");
}

#[test]
fn test_write_csv_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("exports/april.csv");

    let (report, _) = generate_report(&sample_records(), "April");
    write_csv(&report.rows, &nested_path).unwrap();

    assert!(nested_path.exists());
}
