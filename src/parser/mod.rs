//! Record adaptation and schema definitions.
//!
//! This module handles:
//! - Adapting raw backend JSON (with local-language field aliases)
//! - Defaulting bad amounts instead of failing the batch
//! - Defining the record, row and report schema

pub mod records;
pub mod schema;

// Re-export main types
pub use records::{coerce_amount, parse_records, parse_records_str, ParsedRecords};
pub use schema::{CostRecord, CostReport, ExportRow, RecordId, RowKind};
