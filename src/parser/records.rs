//! Adapter from raw backend JSON to [`CostRecord`]s.
//!
//! The backend names fields differently depending on which screen produced
//! the payload (`giathanh` vs `amount`, `parent_id` vs `parentId`, ...).
//! This module is the only place that knows about those names; the engine
//! itself works on [`CostRecord`] only.
//!
//! Bad values are normalised rather than rejected: a non-numeric amount
//! becomes 0, an unreadable ratio or date becomes absent. Only a record
//! without any usable id is dropped.

use super::schema::{CostRecord, RecordId};
use crate::utils::config::{
    AMOUNT_FIELD_NAMES, CATEGORY_FIELD_NAMES, DATETIME_INPUT_FORMATS, DATE_FIELD_NAMES,
    DATE_INPUT_FORMATS, ENVELOPE_FIELD_NAMES, ID_FIELD_NAMES, LABEL_FIELD_NAMES,
    PARENT_FIELD_NAMES, RATIO_FIELD_NAMES,
};
use crate::utils::error::ParseError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{debug, warn};
use serde_json::{Map, Value};

/// Result of adapting a raw payload
#[derive(Debug, Clone, Default)]
pub struct ParsedRecords {
    /// Normalised records, in input order
    pub records: Vec<CostRecord>,

    /// Entries dropped because they had no usable id or were not objects
    pub skipped: usize,
}

/// Parse records from a JSON string
///
/// **Public** - convenience wrapper around [`parse_records`]
pub fn parse_records_str(input: &str) -> Result<ParsedRecords, ParseError> {
    let raw: Value = serde_json::from_str(input)?;
    parse_records(&raw)
}

/// Adapt a raw JSON payload into cost records
///
/// **Public** - main entry point for the input adapter
///
/// # Arguments
/// * `raw` - Either an array of record objects, or an object wrapping
///   that array under `data`, `items`, `records` or `results`
///
/// # Returns
/// Records in input order plus the number of skipped entries
///
/// # Errors
/// * `ParseError::InvalidFormat` - Payload contains no record array at all
pub fn parse_records(raw: &Value) -> Result<ParsedRecords, ParseError> {
    let entries = extract_entries(raw)?;
    debug!("Adapting {} raw record entries", entries.len());

    let mut parsed = ParsedRecords::default();

    for (position, entry) in entries.iter().enumerate() {
        let Some(obj) = entry.as_object() else {
            warn!("Skipping entry {}: not a JSON object", position);
            parsed.skipped += 1;
            continue;
        };

        match adapt_record(obj) {
            Some(record) => parsed.records.push(record),
            None => {
                warn!("Skipping entry {}: no usable id", position);
                parsed.skipped += 1;
            }
        }
    }

    debug!(
        "Adapted {} records ({} skipped)",
        parsed.records.len(),
        parsed.skipped
    );

    Ok(parsed)
}

/// Locate the record array inside the payload
///
/// **Private** - internal helper for parse_records
fn extract_entries(raw: &Value) -> Result<&Vec<Value>, ParseError> {
    match raw {
        Value::Array(entries) => Ok(entries),
        Value::Object(obj) => ENVELOPE_FIELD_NAMES
            .iter()
            .find_map(|name| obj.get(*name).and_then(Value::as_array))
            .ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "Object payload has no record array under any of: {}",
                    ENVELOPE_FIELD_NAMES.join(", ")
                ))
            }),
        _ => Err(ParseError::InvalidFormat(
            "Records must be a JSON array or an object wrapping one".to_string(),
        )),
    }
}

/// Build one record from its raw object, `None` when it has no id
fn adapt_record(obj: &Map<String, Value>) -> Option<CostRecord> {
    let id = field(obj, ID_FIELD_NAMES).and_then(coerce_id)?;
    let parent_id = field(obj, PARENT_FIELD_NAMES).and_then(coerce_id);

    let label = field(obj, LABEL_FIELD_NAMES)
        .and_then(coerce_text)
        .unwrap_or_else(|| format!("Item {}", id));

    Some(CostRecord {
        parent_id,
        amount: coerce_amount(field(obj, AMOUNT_FIELD_NAMES)),
        label,
        category: field(obj, CATEGORY_FIELD_NAMES).and_then(coerce_text),
        stored_ratio: field(obj, RATIO_FIELD_NAMES).and_then(coerce_number),
        created_at: field(obj, DATE_FIELD_NAMES).and_then(coerce_date),
        id,
    })
}

/// First non-null value among the alias names
fn field<'a>(obj: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| obj.get(*name))
        .find(|value| !value.is_null())
}

/// Float bounds of the i64 range, end exclusive
const I64_FLOAT_MIN: f64 = -9_223_372_036_854_775_808.0;
const I64_FLOAT_END: f64 = 9_223_372_036_854_775_808.0;

fn coerce_id(value: &Value) -> Option<RecordId> {
    match value {
        Value::Number(n) => {
            if let Some(id) = n.as_i64() {
                Some(RecordId::Int(id))
            } else {
                // 12.0 from a loosely typed backend is still id 12; anything
                // that would not survive the cast unchanged is not an id
                let id = n
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && (I64_FLOAT_MIN..I64_FLOAT_END).contains(f))
                    .map(|f| RecordId::Int(f as i64));
                if id.is_none() {
                    warn!("Ignoring id {}: not an integer in range", n);
                }
                id
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| RecordId::Text(trimmed.to_string()))
        }
        _ => None,
    }
}

fn coerce_text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Coerce an amount, defaulting to 0 for missing or non-numeric values
///
/// **Public** - also used by callers feeding amounts from other sources
pub fn coerce_amount(value: Option<&Value>) -> f64 {
    match value.and_then(coerce_number) {
        Some(amount) => amount,
        None => {
            if let Some(v) = value {
                debug!("Non-numeric amount {} coerced to 0", v);
            }
            0.0
        }
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn coerce_date(value: &Value) -> Option<NaiveDate> {
    let text = value.as_str()?.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    for format in DATETIME_INPUT_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.date());
        }
    }

    for format in DATE_INPUT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }

    debug!("Unrecognised date '{}' ignored", text);
    None
}
