use chrono::Days;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};
use trial_common::leading_year;
use trial_ingest::LoadedSources;
use trial_model::{CanonicalTables, Gender, Subject, TreatmentArm};

use crate::age::derive_age;
use crate::config::TransformConfig;
use crate::error::{Result, TransformError};
use crate::events::EventGenerator;
use crate::join::{JoinedPatient, join_first_admission};
use crate::random::pick_uniform;

/// Row counts from one transform run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransformStats {
    pub patients: usize,
    pub admissions: usize,
    /// Distinct subjects present in both extracts.
    pub joined: usize,
    /// Joined subjects without a usable gender or birth year.
    pub dropped: usize,
    pub events: usize,
}

impl TransformStats {
    pub fn subjects(&self) -> usize {
        self.joined - self.dropped
    }
}

/// Builds the canonical tables from raw extracts.
#[derive(Debug, Clone)]
pub struct SchemaTransformer {
    config: TransformConfig,
}

impl SchemaTransformer {
    pub fn new(config: TransformConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Join, derive and synthesize.
    ///
    /// Fails when the patients or admissions table was not loaded or lacks a
    /// join column. Subjects with an unusable gender or birth year are
    /// dropped and counted, not treated as errors.
    pub fn transform(
        &self,
        sources: &LoadedSources,
        rng: &mut dyn rand::RngCore,
    ) -> Result<(CanonicalTables, TransformStats)> {
        let patients = self.table(sources, &self.config.patients_table)?;
        let admissions = self.table(sources, &self.config.admissions_table)?;

        let joined = join_first_admission(patients, admissions, &self.config)?;
        let mut stats = TransformStats {
            patients: patients.height(),
            admissions: admissions.height(),
            joined: joined.len(),
            ..TransformStats::default()
        };
        debug!(
            patients = stats.patients,
            admissions = stats.admissions,
            joined = stats.joined,
            "joined patients to first admission"
        );

        let mut subjects = Vec::with_capacity(joined.len());
        for patient in &joined {
            match self.subject_from(patient, rng) {
                Some(subject) => subjects.push(subject),
                None => stats.dropped += 1,
            }
        }

        let events = EventGenerator::new(&self.config)?.generate(&subjects, rng);
        stats.events = events.len();

        info!(
            subjects = subjects.len(),
            dropped = stats.dropped,
            events = stats.events,
            "built canonical tables"
        );

        Ok((
            CanonicalTables {
                subjects,
                adverse_events: events,
            },
            stats,
        ))
    }

    fn table<'s>(
        &self,
        sources: &'s LoadedSources,
        name: &str,
    ) -> Result<&'s polars::prelude::DataFrame> {
        sources
            .get(name)
            .ok_or_else(|| TransformError::MissingTable {
                table: name.to_string(),
            })
    }

    fn subject_from(&self, patient: &JoinedPatient, rng: &mut dyn rand::RngCore) -> Option<Subject> {
        let gender = patient
            .gender
            .as_deref()
            .and_then(|value| value.parse::<Gender>().ok());
        let Some(gender) = gender else {
            warn!(
                row = patient.patient_row,
                admission_row = patient.admission_row,
                "dropping subject with unusable gender"
            );
            return None;
        };
        let Some(birth_year) = patient.birth.as_deref().and_then(leading_year) else {
            warn!(
                row = patient.patient_row,
                admission_row = patient.admission_row,
                "dropping subject with unusable birth year"
            );
            return None;
        };

        Some(Subject {
            subject_id: patient.subject_id,
            age: derive_age(self.config.reference_year, birth_year),
            gender,
            enrollment_date: enrollment_date(&self.config, rng),
            site_id: rng.random_range(self.config.site_min..=self.config.site_max),
            treatment_arm: random_arm(rng),
        })
    }
}

pub(crate) fn enrollment_date(
    config: &TransformConfig,
    rng: &mut dyn rand::RngCore,
) -> chrono::NaiveDate {
    let offset = rng.random_range(0..config.enrollment_window_days);
    // In range: validate() bounds start + window.
    config.enrollment_start + Days::new(u64::from(offset))
}

pub(crate) fn random_arm(rng: &mut dyn rand::RngCore) -> TreatmentArm {
    pick_uniform(&TreatmentArm::ALL, rng)
        .copied()
        .unwrap_or(TreatmentArm::Active)
}
