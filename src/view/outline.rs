//! Plain-text outline of the tree for terminal summaries.

use super::expansion::ExpansionState;
use super::visible::visible_rows;
use crate::aggregator::root_total;
use crate::flatten::format_percentage;
use crate::tree::TreeNode;

const LABEL_WIDTH: usize = 42;

/// Render the visible part of the tree as a text table
///
/// **Public** - used by the report command's `--summary` output
///
/// Collapsed nodes with children are marked `+`, expanded ones `-`.
pub fn render_outline(roots: &[TreeNode], state: &ExpansionState) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "  {:<width$} | {:>16} | {:>16} | {:>8}",
        "Item",
        "Amount",
        "Subtree total",
        "%",
        width = LABEL_WIDTH
    ));
    lines.push(format!("  {}", "-".repeat(LABEL_WIDTH + 48)));

    for row in visible_rows(roots, state) {
        let marker = match (row.has_children, row.expanded) {
            (false, _) => ' ',
            (true, true) => '-',
            (true, false) => '+',
        };
        let entry = format!("{}{} {}", "  ".repeat(row.depth()), marker, row.node.label());

        lines.push(format!(
            "  {:<width$} | {:>16.2} | {:>16.2} | {:>8}",
            truncate(&entry, LABEL_WIDTH),
            row.node.amount(),
            row.node.descendant_total,
            format_percentage(row.node.root_percentage),
            width = LABEL_WIDTH
        ));
    }

    lines.push(format!("  {}", "-".repeat(LABEL_WIDTH + 48)));
    lines.push(format!(
        "  {:<width$} | {:>16.2} |",
        "Total",
        root_total(roots),
        width = LABEL_WIDTH
    ));

    lines.join("\n")
}

/// Cut a label to `width` characters, keeping the start
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width - 3).collect();
        format!("{}...", kept)
    }
}
