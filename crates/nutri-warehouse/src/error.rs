//! Error types for warehouse operations.

use std::path::PathBuf;

use nutri_ingest::IngestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WarehouseError {
    /// The table has never been loaded.
    #[error("table not found: {table}")]
    TableNotFound { table: String },

    /// A table reference is not `project.dataset.table`.
    #[error("invalid table reference {reference:?}: expected project.dataset.table")]
    InvalidTableRef { reference: String },

    /// Storage I/O failed.
    #[error("warehouse I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source file could not be loaded.
    #[error("load failed: {0}")]
    Load(#[from] IngestError),
}

pub type Result<T> = std::result::Result<T, WarehouseError>;
