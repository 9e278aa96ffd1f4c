//! Error types for product ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading sources or tables.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Errors ===
    /// The file could not be parsed as CSV at all.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to serialize a table as CSV.
    #[error("failed to write CSV: {message}")]
    CsvWrite { message: String },

    /// Failed to detect a header row.
    #[error("could not detect header row in {path}")]
    NoHeaderDetected { path: PathBuf },

    /// More malformed records than the load tolerates.
    #[error("{path}: {bad_records} malformed records exceed the limit of {max_bad_records}")]
    TooManyBadRecords {
        path: PathBuf,
        bad_records: usize,
        max_bad_records: usize,
    },

    // === Source Errors ===
    /// HTTP request failed.
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },

    /// Response body was not the expected JSON.
    #[error("invalid JSON from {url}: {message}")]
    Json { url: String, message: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
