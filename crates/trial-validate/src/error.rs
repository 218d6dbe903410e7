use std::path::PathBuf;
use thiserror::Error;
use trial_model::TableName;
use trial_store::StoreError;

#[derive(Debug, Error)]
pub enum ValidateError {
    /// A rule names a column its table does not have.
    #[error("rule '{rule}' references unknown column {table}.{column}")]
    UnknownColumn {
        rule: String,
        table: TableName,
        column: String,
    },

    #[error("rule '{rule}' is already registered")]
    DuplicateRule { rule: String },

    #[error("failed to read rule file {path}: {source}")]
    RuleFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rule file {path}: {message}")]
    RuleFileParse { path: PathBuf, message: String },

    /// Canonical tables could not be read.
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, ValidateError>;
