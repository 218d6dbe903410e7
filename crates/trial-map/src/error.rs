use thiserror::Error;
use trial_model::{DomainCode, TableName};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    /// A required target field is absent from the schema (`row` is `None`)
    /// or empty in a mapped row.
    #[error("{domain} mapping incomplete: required field {field} is missing{}", row_suffix(.row))]
    MappingIncomplete {
        domain: DomainCode,
        row: Option<usize>,
        field: String,
    },

    /// A field source reads a column the canonical table does not have.
    #[error("{domain}.{field} reads unknown column {table}.{column}")]
    UnknownColumn {
        domain: DomainCode,
        field: String,
        table: TableName,
        column: String,
    },

    #[error("{domain} maps field {field} more than once")]
    DuplicateField { domain: DomainCode, field: String },

    /// A custom mapping was handed to the wrong slot of the mapper.
    #[error("expected a {expected} mapping, got {found}")]
    WrongDomain {
        expected: DomainCode,
        found: DomainCode,
    },

    /// A mapping reads a canonical table other than the one its domain is built from.
    #[error("{domain} ({}) must read {expected}, not {found}", .domain.description())]
    WrongSourceTable {
        domain: DomainCode,
        expected: TableName,
        found: TableName,
    },
}

fn row_suffix(row: &Option<usize>) -> String {
    match row {
        Some(index) => format!(" in row {index}"),
        None => " from the schema".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
