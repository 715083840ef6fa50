//! Configuration and constants for the engine and CLI.

use std::time::Duration;

/// Default timeout for backend requests
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Marker used in place of a hierarchical number on the total row
pub const TOTAL_MARKER: &str = "TOTAL";

/// Label printed on the total row
pub const TOTAL_LABEL: &str = "Total";

/// Literal rendered when a percentage cannot be computed
pub const NOT_AVAILABLE: &str = "N/A";

/// Rendered in the category column when a record has no category
pub const EMPTY_CATEGORY: &str = "-";

/// Display format for record dates (day/month/year, as on the dashboard)
pub const DATE_DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Accepted input formats for dates that are not RFC 3339
pub const DATE_INPUT_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];

/// Accepted input formats for date-times that are not RFC 3339
pub const DATETIME_INPUT_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

// Field names for record parsing. The backend mixes English names with
// local-language aliases depending on the screen that produced the payload.
pub const ID_FIELD_NAMES: &[&str] = &["id", "ma", "_id"];
pub const PARENT_FIELD_NAMES: &[&str] = &["parentId", "parent_id", "parent"];
pub const AMOUNT_FIELD_NAMES: &[&str] = &["amount", "giathanh", "gia_thanh", "so_tien", "value"];
pub const LABEL_FIELD_NAMES: &[&str] = &["label", "mo_ta", "description", "name", "ten"];
pub const CATEGORY_FIELD_NAMES: &[&str] = &["category", "categoryName", "ten_danh_muc", "loai"];
pub const RATIO_FIELD_NAMES: &[&str] = &["storedRatio", "ti_le", "ty_le", "ratio"];
pub const DATE_FIELD_NAMES: &[&str] = &["createdAt", "created_at", "ngay_tao", "date"];

/// Keys under which a backend may wrap the record array
pub const ENVELOPE_FIELD_NAMES: &[&str] = &["data", "items", "records", "results"];
