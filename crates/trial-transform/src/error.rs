use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    /// A raw table required for the join was not loaded.
    #[error("required source table '{table}' was not loaded")]
    MissingTable { table: String },

    /// A loaded raw table lacks a column the join needs.
    #[error("source table '{table}' has no '{column}' column")]
    SchemaMismatch { table: String, column: String },

    #[error("invalid transform configuration: {message}")]
    InvalidConfig { message: String },

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

pub type Result<T> = std::result::Result<T, TransformError>;
