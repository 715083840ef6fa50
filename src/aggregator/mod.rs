//! Aggregation of cost trees into totals and percentage shares.
//!
//! This module transforms a freshly built forest into:
//! - Descendant totals for every node
//! - Root-relative and parent-relative percentages
//! - Distribution statistics for summaries

pub mod annotate;
pub mod metrics;

// Re-export main types and functions
pub use annotate::{annotate, percentage_of, root_total};
pub use metrics::{calculate_cost_distribution, largest_items, CostDistribution};
