use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Submission domains the mapper can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DomainCode {
    /// Demographics (Special-Purpose class).
    Dm,
    /// Adverse Events (Events class).
    Ae,
}

impl DomainCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainCode::Dm => "DM",
            DomainCode::Ae => "AE",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DomainCode::Dm => "Demographics",
            DomainCode::Ae => "Adverse Events",
        }
    }

    /// Export file name, e.g. `dm.csv`.
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.as_str().to_ascii_lowercase())
    }
}

impl fmt::Display for DomainCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Missing,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Text(s) => s.trim().is_empty(),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CellValue::Text(s) => s,
            CellValue::Missing => "",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRow {
    pub cells: BTreeMap<String, CellValue>,
}

impl DomainRow {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn set(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.insert(column.into(), value);
    }
}

/// A mapped submission dataset: ordered columns, the subset that must be
/// populated, and the rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainTable {
    pub domain: DomainCode,
    pub columns: Vec<String>,
    pub required: Vec<String>,
    pub rows: Vec<DomainRow>,
}

impl DomainTable {
    pub fn new(domain: DomainCode, columns: Vec<String>, required: Vec<String>) -> Self {
        Self {
            domain,
            columns,
            required,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: DomainRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell text for `column` in row `index`, empty when missing.
    pub fn value(&self, index: usize, column: &str) -> Option<&str> {
        self.rows
            .get(index)
            .and_then(|row| row.get(column))
            .map(CellValue::as_str)
    }

    /// Row values in column order, missing cells as empty strings.
    pub fn ordered_values(&self, row: &DomainRow) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| {
                row.get(column)
                    .map(|cell| cell.as_str().to_string())
                    .unwrap_or_default()
            })
            .collect()
    }
}
