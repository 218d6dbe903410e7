//! Store error types.

use std::path::PathBuf;
use thiserror::Error;
use trial_model::{ModelError, TableName};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The table has never been written to this store.
    #[error("canonical table '{table}' has not been written")]
    NotFound { table: TableName },

    #[error("failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Temp file could not be renamed over the table file.
    #[error("failed to replace {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode or decode table '{table}'")]
    Csv {
        table: TableName,
        #[source]
        source: csv::Error,
    },

    /// Stored header does not match the table's canonical columns.
    #[error("stored table '{table}' has columns [{found}], expected [{expected}]")]
    HeaderMismatch {
        table: TableName,
        expected: String,
        found: String,
    },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("failed to synthesize canonical tables")]
    Synthetic(#[from] trial_transform::TransformError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
