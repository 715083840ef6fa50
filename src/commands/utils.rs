use crate::output::read_report;
use crate::parser::schema::CostReport;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::collections::HashSet;
use std::path::PathBuf;

/// Structural problems in a report's row sequence, empty when it is sound
///
/// Checks that the total row is present exactly once and last, that every
/// item number is a dotted path of positive integers matching its level
/// marker, and that every nested number's parent was emitted before it.
pub fn check_report(report: &CostReport) -> Vec<String> {
    let mut problems = Vec::new();

    let total_count = report.rows.iter().filter(|r| r.is_total()).count();
    if total_count != 1 {
        problems.push(format!("expected exactly one total row, found {}", total_count));
    }
    if !report.rows.last().is_some_and(|r| r.is_total()) {
        problems.push("total row is not the last row".to_string());
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for row in report.rows.iter().filter(|r| !r.is_total()) {
        let number = row.hierarchical_number.as_str();

        let well_formed = number
            .split('.')
            .all(|segment| segment.parse::<u32>().is_ok_and(|n| n > 0));
        if !well_formed {
            problems.push(format!("malformed number '{}'", number));
        }

        if row.level_marker != row.hierarchical_number {
            problems.push(format!("level marker of '{}' does not match", number));
        }

        if let Some(parent) = row.parent_number() {
            if !seen.contains(parent) {
                problems.push(format!("row '{}' appears before its parent '{}'", number, parent));
            }
        }

        if !seen.insert(number) {
            problems.push(format!("duplicate number '{}'", number));
        }
    }

    problems
}

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    let problems = check_report(&report);
    if !problems.is_empty() {
        for problem in &problems {
            println!("  ✗ {}", problem);
        }
        anyhow::bail!("Report has {} structural problems", problems.len());
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Title: {}", report.title);
    println!("  Records: {}", report.record_count);
    println!("  Grand Total: {}", report.grand_total);
    println!("  Rows: {}", report.rows.len());
    println!("  Issues: {}", report.errors.len());

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Cost Tree Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string            - Schema version (e.g., '1.0.0')");
        println!("  title: string              - Report title");
        println!("  record_count: number       - Records that went into the tree");
        println!("  grand_total: number        - Sum of root-level amounts");
        println!("  errors: array              - Repaired build issues");
        println!("    kind: string             - dangling_parent | cycle_detected | duplicate_id");
        println!("    id: number|string        - Record the issue was found on");
        println!("    parent_id: number|string? - Offending parent reference");
        println!("  rows: array                - Numbered rows, total row last");
        println!("    kind: string             - item | total");
        println!("    hierarchical_number: string - '1', '1.2', ... or 'TOTAL'");
        println!("    label: string            - Display name");
        println!("    category_label: string   - Category or '-'");
        println!("    amount: number           - Own amount");
        println!("    percentage_display: string - e.g. '40.0%' or 'N/A'");
        println!("    level_marker: string     - Copy of hierarchical_number");
        println!("    date_display: string     - dd/mm/yyyy or empty");
        println!("    depth: number            - Nesting depth");
        println!("  generated_at: string       - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Cost Tree v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Hierarchical cost roll-ups with numbered spreadsheet export.");
}
