//! Adverse event synthesis.

use chrono::Days;
use rand::Rng;
use rand_distr::{Distribution, Poisson};
use tracing::debug;
use trial_model::{AdverseEvent, AeSeverity, Relatedness, Subject};

use crate::config::TransformConfig;
use crate::error::{Result, TransformError};
use crate::random::{pick_uniform, pick_weighted};

pub const SEVERITY_WEIGHTS: [(AeSeverity, f64); 3] = [
    (AeSeverity::Mild, 0.6),
    (AeSeverity::Moderate, 0.3),
    (AeSeverity::Severe, 0.1),
];

pub const RELATEDNESS_WEIGHTS: [(Relatedness, f64); 3] = [
    (Relatedness::Yes, 0.3),
    (Relatedness::No, 0.5),
    (Relatedness::Possibly, 0.2),
];

/// Draws adverse events for canonical subjects.
///
/// Onset is always at least `onset_min_days` (>= 1) after the subject's
/// enrollment date, so generated events never precede enrollment.
#[derive(Debug)]
pub struct EventGenerator<'a> {
    config: &'a TransformConfig,
    terms: Vec<String>,
    count: Poisson<f64>,
}

impl<'a> EventGenerator<'a> {
    pub fn new(config: &'a TransformConfig) -> Result<Self> {
        config.validate()?;
        let count = Poisson::new(config.ae_mean).map_err(|e| TransformError::InvalidConfig {
            message: format!("ae_mean {}: {e}", config.ae_mean),
        })?;
        let terms = config.vocabulary();
        Ok(Self {
            config,
            terms,
            count,
        })
    }

    /// Events for one subject, in draw order.
    pub fn events_for(&self, subject: &Subject, rng: &mut dyn rand::RngCore) -> Vec<AdverseEvent> {
        let n = self.count.sample(rng) as usize;
        let mut events = Vec::new();
        for _ in 0..n {
            let Some(term) = pick_uniform(&self.terms, rng) else {
                break;
            };
            let severity = pick_weighted(&SEVERITY_WEIGHTS, rng);
            let offset = rng.random_range(self.config.onset_min_days..=self.config.onset_max_days);
            let related = pick_weighted(&RELATEDNESS_WEIGHTS, rng);
            events.push(AdverseEvent {
                subject_id: subject.subject_id,
                ae_term: term.clone(),
                severity,
                // In range: validate() bounds start + window + onset.
                onset_date: subject.enrollment_date + Days::new(u64::from(offset)),
                related_to_study_drug: related,
            });
        }
        events
    }

    /// Events for every subject, grouped by subject in input order.
    pub fn generate(&self, subjects: &[Subject], rng: &mut dyn rand::RngCore) -> Vec<AdverseEvent> {
        let mut events = Vec::new();
        for subject in subjects {
            events.extend(self.events_for(subject, rng));
        }
        debug!(
            subjects = subjects.len(),
            events = events.len(),
            "synthesized adverse events"
        );
        events
    }
}
