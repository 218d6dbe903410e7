use std::path::PathBuf;
use thiserror::Error;
use trial_map::MapError;
use trial_model::DomainCode;

#[derive(Debug, Error)]
pub enum OutputError {
    /// Mapped table failed the completeness check; nothing was written.
    #[error(transparent)]
    Map(#[from] MapError),

    #[error("failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to replace {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {domain} as CSV")]
    Csv {
        domain: DomainCode,
        #[source]
        source: csv::Error,
    },

    #[error("failed to serialize validation report")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OutputError>;
