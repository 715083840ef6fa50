//! Summary statistics over an annotated forest.
//!
//! These figures feed the CLI summary and the logs; nothing in the export
//! path depends on them.

use super::annotate::{percentage_of, root_total};
use crate::tree::{PreOrderIter, TreeNode};
use log::debug;

/// Cost distribution statistics
///
/// **Public** - returned from calculate_cost_distribution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostDistribution {
    /// Sum of root-level amounts
    pub grand_total: f64,

    /// Number of root nodes
    pub root_count: usize,

    /// Number of nodes at any depth
    pub node_count: usize,

    /// Number of nodes without children
    pub leaf_count: usize,

    /// Deepest nesting level, 0 when every node is a root
    pub max_depth: usize,

    /// Label of the root with the largest amount
    pub largest_root: Option<String>,

    /// Share of the largest root in the grand total
    pub largest_root_percentage: Option<f64>,
}

impl CostDistribution {
    /// Check if costs are dominated by a single top-level item
    ///
    /// Returns true if the largest root holds more than 80% of the total
    pub fn is_highly_concentrated(&self) -> bool {
        self.largest_root_percentage.is_some_and(|p| p > 80.0)
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        let largest = match (&self.largest_root, self.largest_root_percentage) {
            (Some(label), Some(pct)) => format!("{} ({:.1}%)", label, pct),
            (Some(label), None) => label.clone(),
            _ => "-".to_string(),
        };
        format!(
            "Total: {} | Roots: {} | Nodes: {} | Leaves: {} | Depth: {} | Largest: {}",
            self.grand_total,
            self.root_count,
            self.node_count,
            self.leaf_count,
            self.max_depth,
            largest
        )
    }
}

/// Calculate distribution statistics for a forest
///
/// **Public** - main entry point for summary statistics
pub fn calculate_cost_distribution(roots: &[TreeNode]) -> CostDistribution {
    if roots.is_empty() {
        return CostDistribution::default();
    }

    let grand_total = root_total(roots);

    let mut node_count = 0;
    let mut leaf_count = 0;
    let mut max_depth = 0;
    for node in PreOrderIter::forest(roots) {
        node_count += 1;
        if node.is_leaf() {
            leaf_count += 1;
        }
        max_depth = max_depth.max(node.depth);
    }

    // Ties go to the earlier root
    let largest = roots.iter().fold(None::<&TreeNode>, |best, node| match best {
        Some(b) if b.amount() >= node.amount() => Some(b),
        _ => Some(node),
    });

    debug!(
        "Distribution over {} nodes, grand total {}",
        node_count, grand_total
    );

    CostDistribution {
        grand_total,
        root_count: roots.len(),
        node_count,
        leaf_count,
        max_depth,
        largest_root: largest.map(|n| n.label().to_string()),
        largest_root_percentage: largest.and_then(|n| percentage_of(n.amount(), grand_total)),
    }
}

/// The `top_n` nodes with the largest own amounts, at any depth
///
/// **Public** - used for the "largest items" section of the summary
pub fn largest_items(roots: &[TreeNode], top_n: usize) -> Vec<&TreeNode> {
    let mut nodes: Vec<&TreeNode> = PreOrderIter::forest(roots).collect();
    // Stable sort keeps outline order among equal amounts
    nodes.sort_by(|a, b| b.amount().total_cmp(&a.amount()));
    nodes.truncate(top_n);
    nodes
}
