//! Inner join of patients with their first admission.

use std::collections::{HashMap, HashSet};

use polars::prelude::{Column, DataFrame};
use trial_common::{ColumnLookup, cell_to_i64, cell_to_string_non_empty};

use crate::config::TransformConfig;
use crate::error::{Result, TransformError};

/// One patient row that matched at least one admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct JoinedPatient {
    pub subject_id: i64,
    pub patient_row: usize,
    /// First admission row for the subject in the admissions extract.
    pub admission_row: usize,
    pub gender: Option<String>,
    pub birth: Option<String>,
}

fn require<'a>(df: &'a DataFrame, table: &str, column: &str) -> Result<&'a Column> {
    ColumnLookup::from_frame(df)
        .column(df, column)
        .ok_or_else(|| TransformError::SchemaMismatch {
            table: table.to_string(),
            column: column.to_string(),
        })
}

/// Join `patients` to `admissions` on the subject key.
///
/// A subject with several admissions keeps the first one in file order; this
/// is a stable tie-break, not a clinical choice. Patients are emitted in
/// patient file order, one row per distinct subject. Null keys never match.
pub(crate) fn join_first_admission(
    patients: &DataFrame,
    admissions: &DataFrame,
    config: &TransformConfig,
) -> Result<Vec<JoinedPatient>> {
    let patient_key = require(patients, &config.patients_table, &config.subject_key)?;
    let gender = require(patients, &config.patients_table, &config.gender_column)?;
    let birth = require(patients, &config.patients_table, &config.birth_column)?;
    let admission_key = require(admissions, &config.admissions_table, &config.subject_key)?;

    let mut first_admission: HashMap<i64, usize> = HashMap::new();
    for idx in 0..admissions.height() {
        if let Some(id) = cell_to_i64(admission_key.get(idx)?) {
            first_admission.entry(id).or_insert(idx);
        }
    }

    let mut seen = HashSet::new();
    let mut joined = Vec::new();
    for idx in 0..patients.height() {
        let Some(subject_id) = cell_to_i64(patient_key.get(idx)?) else {
            continue;
        };
        let Some(&admission_row) = first_admission.get(&subject_id) else {
            continue;
        };
        if !seen.insert(subject_id) {
            continue;
        }
        joined.push(JoinedPatient {
            subject_id,
            patient_row: idx,
            admission_row,
            gender: cell_to_string_non_empty(gender.get(idx)?),
            birth: cell_to_string_non_empty(birth.get(idx)?),
        });
    }
    Ok(joined)
}
