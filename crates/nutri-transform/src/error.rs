//! Error types for the cleaning and transform stages.

use nutri_ingest::IngestError;
use thiserror::Error;

/// Structural failures. Per-value problems never surface here; they become
/// nulls.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Two columns share a name after column-name cleaning.
    #[error("duplicate column name after cleaning: {name}")]
    DuplicateColumn { name: String },

    /// Reading or writing a table failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for stage operations.
pub type Result<T> = std::result::Result<T, TransformError>;
