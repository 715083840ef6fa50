//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Malformed business data never ends up here: broken parent references and
//! cycles are reported through [`crate::tree::BuildError`] alongside a usable forest.

use thiserror::Error;

/// Errors that can occur while talking to the backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    #[error("Failed to read records file: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Records file is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Errors that can occur while adapting raw records
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid records format: {0}")]
    InvalidFormat(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to read file: {0}")]
    ReadFailed(std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    CsvFailed(#[from] csv::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Encoding error: {0}")]
    Encoding(String),
}
