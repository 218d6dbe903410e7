use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ModelError;

/// The closed set of canonical tables the store knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    Demographics,
    AdverseEvents,
}

impl TableName {
    pub const ALL: [TableName; 2] = [TableName::Demographics, TableName::AdverseEvents];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Demographics => "demographics",
            TableName::AdverseEvents => "adverse_events",
        }
    }

    /// Column names in storage order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            TableName::Demographics => &[
                "subject_id",
                "age",
                "gender",
                "enrollment_date",
                "site_id",
                "treatment_arm",
            ],
            TableName::AdverseEvents => &[
                "subject_id",
                "ae_term",
                "severity",
                "onset_date",
                "related_to_study_drug",
            ],
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns().contains(&column)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableName {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "demographics" => Ok(TableName::Demographics),
            "adverse_events" => Ok(TableName::AdverseEvents),
            _ => Err(ModelError::UnknownTable {
                name: s.to_string(),
            }),
        }
    }
}

impl<'de> serde::Deserialize<'de> for TableName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A single typed cell of a canonical row, addressed by column name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldValue {
    Int(i64),
    Text(String),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// Column-addressed access to a canonical row.
///
/// Declarative validation rules and domain mappings name columns as strings;
/// this is the seam through which they read typed records.
pub trait TableRow {
    fn field(&self, column: &str) -> Option<FieldValue>;
}

/// A record type persisted as one canonical table.
pub trait CanonicalRecord: TableRow + Serialize + DeserializeOwned + Clone {
    const TABLE: TableName;
}
