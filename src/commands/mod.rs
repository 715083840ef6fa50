//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod report;
pub mod utils;

// Re-export main command functions
pub use models::{RecordSource, ReportArgs};
pub use report::{execute_report, generate_report, select_source, validate_args};
pub use utils::{check_report, display_schema, display_version, validate_report_file};
