//! Data model shared by the engine and its JSON/CSV outputs.
//!
//! Records come in flat with parent references; rows go out flat with
//! hierarchical numbers. Everything in between lives in [`crate::tree`].

use crate::tree::BuildError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a cost record as sent by the backend.
///
/// Integer and string ids are kept apart: `1` and `"1"` are different records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl RecordId {
    /// The same id in the other representation, if it has one
    ///
    /// `Int(12)` and `Text("12")` map onto each other; `Text("012")` and
    /// `Text("a-1")` have no integer form.
    pub fn alternate(&self) -> Option<RecordId> {
        match self {
            RecordId::Int(id) => Some(RecordId::Text(id.to_string())),
            RecordId::Text(text) => text
                .parse::<i64>()
                .ok()
                .filter(|id| id.to_string() == *text)
                .map(RecordId::Int),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId::Text(id)
    }
}

/// A single cost entry, already normalised by the input adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    /// Unique identifier
    pub id: RecordId,

    /// Parent record, `None` for root-level entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<RecordId>,

    /// Cost amount; negative values are credits and pass through untouched
    #[serde(default)]
    pub amount: f64,

    /// Display name
    pub label: String,

    /// Category or type label shown in its own export column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Upstream percentage (0-100) that wins over the computed root share
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_ratio: Option<f64>,

    /// Creation date, display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,
}

impl CostRecord {
    /// Create a root-level record
    pub fn new(id: impl Into<RecordId>, amount: f64, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            amount,
            label: label.into(),
            category: None,
            stored_ratio: None,
            created_at: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<RecordId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_stored_ratio(mut self, ratio: f64) -> Self {
        self.stored_ratio = Some(ratio);
        self
    }

    pub fn with_created_at(mut self, date: NaiveDate) -> Self {
        self.created_at = Some(date);
        self
    }
}

/// Whether an export row is a tree node or the trailing total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Item,
    Total,
}

/// One row of the flattened, numbered table handed to exporters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub kind: RowKind,

    /// Outline number such as "2.1.3", or the TOTAL marker
    pub hierarchical_number: String,

    pub label: String,

    pub category_label: String,

    pub amount: f64,

    /// One decimal place with a trailing "%", or "N/A"
    pub percentage_display: String,

    /// Duplicate of the hierarchical number for the level column
    pub level_marker: String,

    /// Formatted creation date, empty when unknown
    pub date_display: String,

    /// Nesting depth, 0 for roots and for the total row
    pub depth: usize,
}

impl ExportRow {
    pub fn is_total(&self) -> bool {
        self.kind == RowKind::Total
    }

    /// Number of the enclosing row, `None` for roots and the total row
    pub fn parent_number(&self) -> Option<&str> {
        if self.is_total() {
            return None;
        }
        self.hierarchical_number
            .rsplit_once('.')
            .map(|(parent, _)| parent)
    }
}

/// Top-level report document written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Report title (screen name, period, ...)
    pub title: String,

    /// Number of records that went into the tree
    pub record_count: usize,

    /// Sum of root-level amounts
    pub grand_total: f64,

    /// Non-fatal issues found while building the tree
    #[serde(default)]
    pub errors: Vec<BuildError>,

    /// Numbered rows, total row last
    pub rows: Vec<ExportRow>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_untagged_json() {
        let ids: Vec<RecordId> = serde_json::from_str(r#"[7, "a-1"]"#).unwrap();
        assert_eq!(ids, vec![RecordId::Int(7), RecordId::Text("a-1".to_string())]);
        assert_ne!(RecordId::Int(1), RecordId::from("1"));
    }

    #[test]
    fn test_record_id_alternate() {
        assert_eq!(RecordId::Int(12).alternate(), Some(RecordId::from("12")));
        assert_eq!(RecordId::from("-3").alternate(), Some(RecordId::Int(-3)));
        assert_eq!(RecordId::from("012").alternate(), None);
        assert_eq!(RecordId::from("a-1").alternate(), None);
    }

    #[test]
    fn test_parent_number() {
        let mut row = ExportRow {
            kind: RowKind::Item,
            hierarchical_number: "2.1.3".to_string(),
            label: "x".to_string(),
            category_label: "-".to_string(),
            amount: 0.0,
            percentage_display: "N/A".to_string(),
            level_marker: "2.1.3".to_string(),
            date_display: String::new(),
            depth: 2,
        };
        assert_eq!(row.parent_number(), Some("2.1"));

        row.hierarchical_number = "2".to_string();
        assert_eq!(row.parent_number(), None);
    }
}
