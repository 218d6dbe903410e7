use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown canonical table: {name}")]
    UnknownTable { name: String },
    #[error("invalid {field} value '{value}'")]
    InvalidValue { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
