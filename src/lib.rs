//! Cost Tree
//!
//! Hierarchical cost tree engine for business dashboards: takes flat cost
//! records linked by parent ids, rebuilds the tree, rolls up totals and
//! percentage shares, and flattens it into a numbered table for
//! spreadsheet export.
//!
//! ## Getting Started
//!
//! ```no_run
//! use cost_tree::aggregator::annotate;
//! use cost_tree::flatten::flatten;
//! use cost_tree::parser::CostRecord;
//! use cost_tree::tree::build_tree;
//!
//! let records = vec![
//!     CostRecord::new(1, 1_000_000.0, "Materials"),
//!     CostRecord::new(2, 400_000.0, "Cement").with_parent(1),
//! ];
//! let mut forest = build_tree(&records);
//! annotate(&mut forest.roots);
//! let rows = flatten(&forest.roots);
//! assert_eq!(rows.last().unwrap().hierarchical_number, "TOTAL");
//! ```
//!
//! Data flow: records → [`tree::build_tree`] → [`aggregator::annotate`] →
//! [`view`] for interactive display, [`flatten::flatten`] for export.

pub mod aggregator;
pub mod commands;
pub mod flatten;
pub mod output;
pub mod parser;
pub mod store;
pub mod tree;
pub mod utils;
pub mod view;
