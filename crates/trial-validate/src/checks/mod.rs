//! Declarative row and column checks.
//!
//! Every check addresses columns by canonical name and reads values through
//! [`TableRow::field`], so the same check works on either table.

mod presence;
mod reference;
mod values;

use serde::{Deserialize, Serialize};
use trial_model::{CanonicalTables, TableName, TableRow};

/// What a rule tests. Each variant counts violating rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Check {
    /// Integer value within `[min, max]`; an absent bound is open.
    IntRange {
        column: String,
        min: Option<i64>,
        max: Option<i64>,
    },
    /// Rows repeating a value already seen earlier in the column.
    Unique { column: String },
    /// Value must be one of `values` (compared as text).
    AllowedValues { column: String, values: Vec<String> },
    /// Value must exist in `references.referenced_column`.
    ForeignKey {
        column: String,
        references: TableName,
        referenced_column: String,
    },
    /// Date in `column` must not precede the date in
    /// `references.referenced_column` of the row whose `referenced_key`
    /// equals this row's `key`. Rows without a referenced row are not counted.
    NotBeforeReference {
        column: String,
        key: String,
        references: TableName,
        referenced_key: String,
        referenced_column: String,
    },
    /// Value present and not blank.
    Required { column: String },
}

impl Check {
    /// Column the check is primarily about, used for `{column}` in messages.
    pub fn column(&self) -> &str {
        match self {
            Check::IntRange { column, .. }
            | Check::Unique { column }
            | Check::AllowedValues { column, .. }
            | Check::ForeignKey { column, .. }
            | Check::NotBeforeReference { column, .. }
            | Check::Required { column } => column,
        }
    }

    /// Every `(table, column)` the check reads when applied to `table`.
    pub fn referenced_columns(&self, table: TableName) -> Vec<(TableName, &str)> {
        match self {
            Check::ForeignKey {
                column,
                references,
                referenced_column,
            } => vec![
                (table, column.as_str()),
                (*references, referenced_column.as_str()),
            ],
            Check::NotBeforeReference {
                column,
                key,
                references,
                referenced_key,
                referenced_column,
            } => vec![
                (table, column.as_str()),
                (table, key.as_str()),
                (*references, referenced_key.as_str()),
                (*references, referenced_column.as_str()),
            ],
            other => vec![(table, other.column())],
        }
    }

    /// Number of rows of `table` that violate the check.
    pub fn count_violations(&self, table: TableName, tables: &CanonicalTables) -> u64 {
        let rows = table_rows(tables, table);
        match self {
            Check::IntRange { column, min, max } => {
                presence::out_of_range(&rows, column, *min, *max)
            }
            Check::Required { column } => presence::missing(&rows, column),
            Check::Unique { column } => values::duplicates(&rows, column),
            Check::AllowedValues { column, values } => values::not_allowed(&rows, column, values),
            Check::ForeignKey {
                column,
                references,
                referenced_column,
            } => reference::dangling(
                &rows,
                column,
                &table_rows(tables, *references),
                referenced_column,
            ),
            Check::NotBeforeReference {
                column,
                key,
                references,
                referenced_key,
                referenced_column,
            } => reference::before_reference(
                &rows,
                column,
                key,
                &table_rows(tables, *references),
                referenced_key,
                referenced_column,
            ),
        }
    }
}

fn table_rows(tables: &CanonicalTables, table: TableName) -> Vec<&dyn TableRow> {
    match table {
        TableName::Demographics => tables
            .subjects
            .iter()
            .map(|row| row as &dyn TableRow)
            .collect(),
        TableName::AdverseEvents => tables
            .adverse_events
            .iter()
            .map(|row| row as &dyn TableRow)
            .collect(),
    }
}

fn count(n: usize) -> u64 {
    n as u64
}
