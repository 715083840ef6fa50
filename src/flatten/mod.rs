//! Numbered, flat projection of a cost tree.
//!
//! The row sequence produced here is the contract with every exporter:
//! spreadsheet writers map its fields straight onto columns.

pub mod numbering;

pub use numbering::{flatten, format_date, format_percentage};
