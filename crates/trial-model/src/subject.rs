use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::table::{CanonicalRecord, FieldValue, TableName, TableRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::F => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ModelError;

    /// Accepts `M`/`F` and the spelled-out forms, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "M" | "MALE" => Ok(Gender::M),
            "F" | "FEMALE" => Ok(Gender::F),
            _ => Err(ModelError::InvalidValue {
                field: "gender",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreatmentArm {
    Active,
    Control,
}

impl TreatmentArm {
    pub const ALL: [TreatmentArm; 2] = [TreatmentArm::Active, TreatmentArm::Control];

    pub fn as_str(&self) -> &'static str {
        match self {
            TreatmentArm::Active => "Active",
            TreatmentArm::Control => "Control",
        }
    }
}

impl fmt::Display for TreatmentArm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One enrolled subject in the canonical `demographics` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub subject_id: i64,
    pub age: i32,
    pub gender: Gender,
    pub enrollment_date: NaiveDate,
    pub site_id: u32,
    pub treatment_arm: TreatmentArm,
}

impl TableRow for Subject {
    fn field(&self, column: &str) -> Option<FieldValue> {
        match column {
            "subject_id" => Some(FieldValue::Int(self.subject_id)),
            "age" => Some(FieldValue::Int(i64::from(self.age))),
            "gender" => Some(FieldValue::Text(self.gender.as_str().to_string())),
            "enrollment_date" => Some(FieldValue::Date(self.enrollment_date)),
            "site_id" => Some(FieldValue::Int(i64::from(self.site_id))),
            "treatment_arm" => Some(FieldValue::Text(self.treatment_arm.as_str().to_string())),
            _ => None,
        }
    }
}

impl CanonicalRecord for Subject {
    const TABLE: TableName = TableName::Demographics;
}
