use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use trial_model::{CellValue, DomainCode, FieldValue, TableName, TableRow};

use crate::error::{MapError, Result};

/// Where a target field's value comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldSource {
    /// Same value on every row.
    Constant { value: String },
    /// Canonical value in its display form.
    Copy { column: String },
    /// Canonical value as trimmed text; blank text is missing.
    Text { column: String },
    /// Date formatted `YYYY-MM-DD`; non-date values are missing.
    IsoDate { column: String },
    /// `{study_id}-{id}` with the integer id zero-padded to `width` digits.
    SubjectKey { column: String, width: usize },
    /// 1-based counter per distinct `key` value, in row order.
    Sequence { key: String },
    /// Text in upper case.
    Upper { column: String },
}

impl FieldSource {
    pub fn column(&self) -> Option<&str> {
        match self {
            FieldSource::Constant { .. } => None,
            FieldSource::Copy { column }
            | FieldSource::Text { column }
            | FieldSource::IsoDate { column }
            | FieldSource::SubjectKey { column, .. }
            | FieldSource::Upper { column } => Some(column),
            FieldSource::Sequence { key } => Some(key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub target: String,
    pub source: FieldSource,
    /// Must be non-missing in every mapped row.
    pub required: bool,
}

impl FieldMapping {
    pub fn required(target: impl Into<String>, source: FieldSource) -> Self {
        Self {
            target: target.into(),
            source,
            required: true,
        }
    }

    pub fn optional(target: impl Into<String>, source: FieldSource) -> Self {
        Self {
            target: target.into(),
            source,
            required: false,
        }
    }
}

/// Field mappings from one canonical table to one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainMapping {
    pub domain: DomainCode,
    pub source_table: TableName,
    pub study_id: String,
    /// Target fields in output column order.
    pub fields: Vec<FieldMapping>,
}

impl DomainMapping {
    pub fn columns(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.target.clone()).collect()
    }

    pub fn required_columns(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.target.clone())
            .collect()
    }

    /// Check that targets are distinct and every source column exists.
    pub fn validate(&self) -> Result<()> {
        let mut targets = HashSet::new();
        for field in &self.fields {
            if !targets.insert(field.target.as_str()) {
                return Err(MapError::DuplicateField {
                    domain: self.domain,
                    field: field.target.clone(),
                });
            }
            if let Some(column) = field.source.column()
                && !self.source_table.has_column(column)
            {
                return Err(MapError::UnknownColumn {
                    domain: self.domain,
                    field: field.target.clone(),
                    table: self.source_table,
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Per-run state for [`FieldSource::Sequence`] counters.
#[derive(Debug, Default)]
pub(crate) struct SequenceState {
    counters: HashMap<(String, FieldValue), u64>,
}

impl SequenceState {
    fn next(&mut self, key: &str, value: FieldValue) -> u64 {
        let counter = self.counters.entry((key.to_string(), value)).or_insert(0);
        *counter += 1;
        *counter
    }
}

pub(crate) fn map_value(
    source: &FieldSource,
    row: &dyn TableRow,
    study_id: &str,
    sequences: &mut SequenceState,
) -> CellValue {
    let text = |value: Option<String>| value.map_or(CellValue::Missing, CellValue::Text);
    match source {
        FieldSource::Constant { value } => CellValue::Text(value.clone()),
        FieldSource::Copy { column } => text(row.field(column).map(|v| v.to_string())),
        FieldSource::Text { column } => text(
            row.field(column)
                .map(|v| v.to_string().trim().to_string())
                .filter(|s| !s.is_empty()),
        ),
        FieldSource::IsoDate { column } => text(
            row.field(column)
                .and_then(|v| v.as_date())
                .map(|d| d.format("%Y-%m-%d").to_string()),
        ),
        FieldSource::SubjectKey { column, width } => text(
            row.field(column)
                .and_then(|v| v.as_int())
                .map(|id| format!("{study_id}-{id:0width$}", width = *width)),
        ),
        FieldSource::Sequence { key } => text(
            row.field(key)
                .map(|value| sequences.next(key, value).to_string()),
        ),
        FieldSource::Upper { column } => {
            text(row.field(column).map(|v| v.to_string().to_uppercase()))
        }
    }
}
