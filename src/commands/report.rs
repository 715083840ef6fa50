//! Report command implementation.
//!
//! The report command:
//! 1. Loads raw records from a file or the backend
//! 2. Adapts them into cost records
//! 3. Builds the forest
//! 4. Annotates totals and percentages
//! 5. Flattens and writes output files

use super::models::{RecordSource, ReportArgs};
use crate::aggregator::{annotate, calculate_cost_distribution, largest_items, root_total};
use crate::flatten::{flatten, format_percentage};
use crate::output::{write_csv, write_report};
use crate::parser::schema::{CostRecord, CostReport, RecordId};
use crate::parser::parse_records;
use crate::store::{read_records_file, RecordsClient};
use crate::tree::{build_tree, Forest};
use crate::utils::config::SCHEMA_VERSION;
use crate::view::{render_outline, ExpansionState};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Default title when none is given
const DEFAULT_TITLE: &str = "Cost report";

/// Run the whole engine over a record snapshot
///
/// **Public** - pure pipeline used by the command and by tests
///
/// # Returns
/// The report document and the annotated forest it was flattened from
pub fn generate_report(records: &[CostRecord], title: &str) -> (CostReport, Forest) {
    let mut forest = build_tree(records);
    annotate(&mut forest.roots);

    let rows = flatten(&forest.roots);

    let report = CostReport {
        version: SCHEMA_VERSION.to_string(),
        title: title.to_string(),
        record_count: records.len(),
        grand_total: root_total(&forest.roots),
        errors: forest.errors.clone(),
        rows,
        generated_at: chrono::Utc::now().to_rfc3339(),
    };

    (report, forest)
}

/// Execute the report command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Record source unreachable or unreadable
/// * Payload without a record array
/// * File write errors
///
/// Broken parent references and cycles are not errors here; they are
/// logged, counted and written into the report.
pub fn execute_report(args: ReportArgs) -> Result<()> {
    let start_time = Instant::now();

    // Step 1: Load raw records
    info!("Step 1/5: Loading records...");
    let raw = load_raw(&args.source).context("Failed to load cost records")?;

    // Step 2: Adapt records
    info!("Step 2/5: Adapting records...");
    let parsed = parse_records(&raw).context("Failed to parse cost records")?;
    if parsed.skipped > 0 {
        warn!("{} entries had no usable id and were skipped", parsed.skipped);
    }

    // Steps 3 and 4: Build and annotate
    info!("Step 3/5: Building cost tree...");
    info!("Step 4/5: Calculating totals and percentages...");
    let title = args.title.as_deref().unwrap_or(DEFAULT_TITLE);
    let (report, forest) = generate_report(&parsed.records, title);

    if forest.has_errors() {
        warn!(
            "{} cost items had broken references",
            forest.errors.len()
        );
        for error in &forest.errors {
            debug!("  {}", error);
        }
    }

    let distribution = calculate_cost_distribution(&forest.roots);
    info!("Cost distribution: {}", distribution.summary());

    // Step 5: Write outputs
    info!("Step 5/5: Writing output files...");
    write_report(&report, &args.output_json).context("Failed to write report JSON")?;
    info!("✓ Report written to: {}", args.output_json.display());

    if let Some(csv_path) = &args.output_csv {
        write_csv(&report.rows, csv_path).context("Failed to write report CSV")?;
        info!("✓ Rows written to: {}", csv_path.display());
    }

    if args.print_summary {
        let mut state = ExpansionState::with_roots_expanded(&forest.roots);
        for id in &args.expand {
            for candidate in id_candidates(id) {
                state.expand(candidate);
            }
        }

        println!("\n{}", "=".repeat(80));
        println!("{}", title.to_uppercase());
        println!("{}", "=".repeat(80));
        println!("Records:     {}", report.record_count);
        println!("Grand total: {}", report.grand_total);
        if forest.has_errors() {
            println!("Issues:      {} cost items had broken references", forest.errors.len());
        }
        println!("\n{}", render_outline(&forest.roots, &state));
        println!("\nLargest items:");
        for node in largest_items(&forest.roots, 5) {
            println!(
                "  {:<40} {:>16.2} {:>8}",
                node.label(),
                node.amount(),
                format_percentage(node.root_percentage)
            );
        }
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Report completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Fetch the raw payload from the configured source
///
/// **Private** - internal helper for execute_report
fn load_raw(source: &RecordSource) -> Result<serde_json::Value> {
    match source {
        RecordSource::File(path) => read_records_file(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        RecordSource::Url { url, token, period } => {
            let mut client = RecordsClient::new(url.as_str())
                .context("Failed to create HTTP client")?;
            if let Some(token) = token {
                client = client.with_token(token.as_str());
            }
            client
                .fetch_records(period.as_deref())
                .with_context(|| format!("Failed to fetch records from {}", url))
        }
    }
}

/// Ids a command-line value may refer to
///
/// "12" may be an integer id or a string id depending on the backend, so both
/// forms are returned.
fn id_candidates(value: &str) -> Vec<RecordId> {
    let mut ids = vec![RecordId::Text(value.to_string())];
    if let Ok(id) = value.parse::<i64>() {
        ids.push(RecordId::Int(id));
    }
    ids
}

/// Pick the record source from the command-line options
///
/// **Public** - called from main.rs before building [`ReportArgs`]
///
/// `--input` takes precedence over `--url`. A period only makes sense for
/// the backend, so it is rejected next to `--input`; a URL or token next to
/// `--input` usually comes from the environment and is ignored with a warning.
///
/// # Errors
/// * Neither an input file nor a URL was given
/// * `--period` combined with `--input`
pub fn select_source(
    input: Option<PathBuf>,
    url: Option<String>,
    token: Option<String>,
    period: Option<String>,
) -> Result<RecordSource> {
    match (input, url) {
        (Some(path), url) => {
            if period.is_some() {
                anyhow::bail!("--period only applies to --url, not to --input");
            }
            if url.is_some() || token.is_some() {
                warn!("Reading records from {}; backend URL and token are ignored", path.display());
            }
            Ok(RecordSource::File(path))
        }
        (None, Some(url)) => Ok(RecordSource::Url { url, token, period }),
        (None, None) => anyhow::bail!("Either --input or --url is required"),
    }
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
pub fn validate_args(args: &ReportArgs) -> Result<()> {
    match &args.source {
        RecordSource::File(path) => {
            if path.as_os_str().is_empty() {
                anyhow::bail!("Input path cannot be empty");
            }
        }
        RecordSource::Url { url, period, .. } => {
            if url.is_empty() {
                anyhow::bail!("Backend URL cannot be empty");
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("Backend URL must start with http:// or https://");
            }
            if let Some(period) = period {
                if chrono::NaiveDate::parse_from_str(&format!("{}-01", period), "%Y-%m-%d").is_err() {
                    anyhow::bail!("Period must look like YYYY-MM");
                }
            }
        }
    }

    if args.output_json.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if let Some(csv_path) = &args.output_csv {
        if csv_path == &args.output_json {
            anyhow::bail!("CSV and JSON outputs must be different files");
        }
    }

    Ok(())
}
