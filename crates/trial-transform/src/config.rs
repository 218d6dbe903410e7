use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TransformError};

/// Terms drawn for synthesized adverse events.
pub const DEFAULT_AE_TERMS: &[&str] = &[
    "Nausea",
    "Fatigue",
    "Diarrhea",
    "Headache",
    "Rash",
    "Dizziness",
    "Vomiting",
    "Constipation",
];

/// Largest accepted Poisson mean for per-subject adverse event counts.
pub const MAX_AE_MEAN: f64 = 1000.0;

/// Parameters of the canonical table construction.
///
/// Every field has a default, so a `[transform]` section only needs the
/// values that differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Year ages are computed against.
    pub reference_year: i32,
    /// First possible enrollment date.
    pub enrollment_start: NaiveDate,
    /// Enrollment dates fall in `[start, start + window)`.
    pub enrollment_window_days: u32,
    pub site_min: u32,
    pub site_max: u32,
    /// Poisson mean of the per-subject adverse event count.
    pub ae_mean: f64,
    pub onset_min_days: u32,
    pub onset_max_days: u32,
    pub ae_terms: Vec<String>,

    /// Raw table and column names the join reads.
    pub patients_table: String,
    pub admissions_table: String,
    pub subject_key: String,
    pub gender_column: String,
    pub birth_column: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            reference_year: 2023,
            enrollment_start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            enrollment_window_days: 365,
            site_min: 1,
            site_max: 5,
            ae_mean: 2.0,
            onset_min_days: 1,
            onset_max_days: 180,
            ae_terms: DEFAULT_AE_TERMS
                .iter()
                .map(|term| (*term).to_string())
                .collect(),
            patients_table: "patients".to_string(),
            admissions_table: "admissions".to_string(),
            subject_key: "subject_id".to_string(),
            gender_column: "gender".to_string(),
            birth_column: "dob".to_string(),
        }
    }
}

impl TransformConfig {
    /// Reject settings that would break the canonical invariants.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| {
            Err(TransformError::InvalidConfig {
                message: message.to_string(),
            })
        };
        if self.enrollment_window_days == 0 {
            return invalid("enrollment_window_days must be at least 1");
        }
        if self.site_min == 0 || self.site_max < self.site_min {
            return invalid("site range must satisfy 1 <= site_min <= site_max");
        }
        if !self.ae_mean.is_finite() || self.ae_mean <= 0.0 || self.ae_mean > MAX_AE_MEAN {
            return invalid(&format!(
                "ae_mean must be a positive number no larger than {MAX_AE_MEAN}"
            ));
        }
        // Onset strictly after enrollment.
        if self.onset_min_days == 0 || self.onset_max_days < self.onset_min_days {
            return invalid("onset window must satisfy 1 <= onset_min_days <= onset_max_days");
        }
        // Enrollment and onset dates are computed with plain addition.
        let latest = u64::from(self.enrollment_window_days - 1) + u64::from(self.onset_max_days);
        if self.enrollment_start.checked_add_days(Days::new(latest)).is_none() {
            return invalid("enrollment and onset windows run past the last representable date");
        }
        if self.vocabulary().is_empty() {
            return invalid("ae_terms must contain at least one term");
        }
        Ok(())
    }

    /// Adverse event terms with surrounding whitespace removed and blanks
    /// dropped, in configured order.
    pub fn vocabulary(&self) -> Vec<String> {
        self.ae_terms
            .iter()
            .map(|term| term.trim())
            .filter(|term| !term.is_empty())
            .map(str::to_string)
            .collect()
    }
}
