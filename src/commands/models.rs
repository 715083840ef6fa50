use std::path::PathBuf;

/// Where the raw records come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    /// JSON file on disk
    File(PathBuf),

    /// Backend endpoint returning the record array
    Url {
        url: String,
        token: Option<String>,
        period: Option<String>,
    },
}

/// Arguments for the report command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// Record source
    pub source: RecordSource,

    /// Output path for the JSON report
    pub output_json: PathBuf,

    /// Output path for the CSV rows (optional)
    pub output_csv: Option<PathBuf>,

    /// Report title
    pub title: Option<String>,

    /// Print the tree outline to stdout
    pub print_summary: bool,

    /// Extra ids to expand in the outline, on top of the roots
    pub expand: Vec<String>,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            source: RecordSource::File(PathBuf::from("records.json")),
            output_json: PathBuf::from("report.json"),
            output_csv: None,
            title: None,
            print_summary: false,
            expand: Vec::new(),
        }
    }
}
