use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::table::{CanonicalRecord, FieldValue, TableName, TableRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AeSeverity {
    Mild,
    Moderate,
    Severe,
}

impl AeSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AeSeverity::Mild => "Mild",
            AeSeverity::Moderate => "Moderate",
            AeSeverity::Severe => "Severe",
        }
    }
}

impl fmt::Display for AeSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Investigator assessment of whether the event is related to the study drug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relatedness {
    Yes,
    No,
    Possibly,
}

impl Relatedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relatedness::Yes => "Yes",
            Relatedness::No => "No",
            Relatedness::Possibly => "Possibly",
        }
    }
}

impl fmt::Display for Relatedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the canonical `adverse_events` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdverseEvent {
    pub subject_id: i64,
    pub ae_term: String,
    pub severity: AeSeverity,
    pub onset_date: NaiveDate,
    pub related_to_study_drug: Relatedness,
}

impl TableRow for AdverseEvent {
    fn field(&self, column: &str) -> Option<FieldValue> {
        match column {
            "subject_id" => Some(FieldValue::Int(self.subject_id)),
            "ae_term" => Some(FieldValue::Text(self.ae_term.clone())),
            "severity" => Some(FieldValue::Text(self.severity.as_str().to_string())),
            "onset_date" => Some(FieldValue::Date(self.onset_date)),
            "related_to_study_drug" => Some(FieldValue::Text(
                self.related_to_study_drug.as_str().to_string(),
            )),
            _ => None,
        }
    }
}

impl CanonicalRecord for AdverseEvent {
    const TABLE: TableName = TableName::AdverseEvents;
}
