//! Flatten an annotated forest into hierarchically numbered rows.
//!
//! Rows come out in pre-order, so the sequence reads as a nested outline:
//!
//! ```text
//! 1      Materials
//! 1.1    Cement
//! 1.2    Steel
//! 2      Labour
//! TOTAL
//! ```
//!
//! Every call is a pure function of the forest it is given.

use crate::aggregator::root_total;
use crate::parser::schema::{ExportRow, RowKind};
use crate::tree::TreeNode;
use crate::utils::config::{
    DATE_DISPLAY_FORMAT, EMPTY_CATEGORY, NOT_AVAILABLE, TOTAL_LABEL, TOTAL_MARKER,
};
use chrono::NaiveDate;
use log::debug;

/// Flatten a forest into export rows
///
/// **Public** - main entry point for export preparation
///
/// # Arguments
/// * `roots` - Annotated roots (see [`crate::aggregator::annotate`])
///
/// # Returns
/// One row per node in pre-order, numbered "1", "1.1", "1.2", "2", ...,
/// followed by exactly one total row.
///
/// The total row sums root-level amounts only, and its percentage is the
/// sum of the root percentages that are present. It is not forced to 100%:
/// stored ratios that disagree with the amounts show up here on purpose.
pub fn flatten(roots: &[TreeNode]) -> Vec<ExportRow> {
    let mut rows = Vec::new();

    // Children are pushed in reverse so they pop in order, right after their parent
    let mut stack: Vec<(&TreeNode, String)> = roots
        .iter()
        .enumerate()
        .rev()
        .map(|(position, root)| (root, (position + 1).to_string()))
        .collect();

    while let Some((node, number)) = stack.pop() {
        stack.extend(
            node.children
                .iter()
                .enumerate()
                .rev()
                .map(|(position, child)| (child, format!("{}.{}", number, position + 1))),
        );
        rows.push(item_row(node, number));
    }

    rows.push(total_row(roots));

    debug!("Flattened {} roots into {} rows", roots.len(), rows.len());

    rows
}

/// Build the row for one node
fn item_row(node: &TreeNode, number: String) -> ExportRow {
    ExportRow {
        kind: RowKind::Item,
        label: node.label().to_string(),
        category_label: node
            .record
            .category
            .clone()
            .unwrap_or_else(|| EMPTY_CATEGORY.to_string()),
        amount: node.amount(),
        percentage_display: format_percentage(node.root_percentage),
        level_marker: number.clone(),
        date_display: format_date(node.record.created_at),
        depth: node.depth,
        hierarchical_number: number,
    }
}

/// Build the trailing total row
fn total_row(roots: &[TreeNode]) -> ExportRow {
    let percentages: Vec<f64> = roots.iter().filter_map(|r| r.root_percentage).collect();
    let percentage = if percentages.is_empty() {
        None
    } else {
        Some(percentages.iter().sum())
    };

    ExportRow {
        kind: RowKind::Total,
        hierarchical_number: TOTAL_MARKER.to_string(),
        label: TOTAL_LABEL.to_string(),
        category_label: String::new(),
        amount: root_total(roots),
        percentage_display: format_percentage(percentage),
        level_marker: TOTAL_MARKER.to_string(),
        date_display: String::new(),
        depth: 0,
    }
}

/// Format a percentage with one decimal place, or "N/A"
///
/// **Public** - shared with the terminal outline
pub fn format_percentage(percentage: Option<f64>) -> String {
    match percentage {
        Some(p) => format!("{:.1}%", p),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Format a record date for display, empty when unknown
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}
