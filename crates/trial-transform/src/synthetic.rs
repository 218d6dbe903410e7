//! Synthetic canonical tables for demos and tests that have no raw extracts.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::info;
use trial_model::{CanonicalTables, Gender, Subject};

use crate::age::clamp_age;
use crate::config::TransformConfig;
use crate::error::{Result, TransformError};
use crate::events::EventGenerator;
use crate::transformer::{enrollment_date, random_arm};

const AGE_MEAN: f64 = 65.0;
const AGE_SD: f64 = 12.0;

/// Generate `count` subjects with ids `1..=count` and their adverse events.
///
/// Ages are drawn from Normal(65, 12) and clamped like derived ages; every
/// other field uses the same draws as [`crate::SchemaTransformer`].
pub fn synthesize(
    count: usize,
    config: &TransformConfig,
    rng: &mut dyn rand::RngCore,
) -> Result<CanonicalTables> {
    config.validate()?;
    let ages = Normal::new(AGE_MEAN, AGE_SD).map_err(|e| TransformError::InvalidConfig {
        message: e.to_string(),
    })?;

    let mut subjects = Vec::with_capacity(count);
    for subject_id in (1..=count).map(|id| id as i64) {
        let age = clamp_age(ages.sample(rng).round() as i64);
        let gender = if rng.random_bool(0.5) { Gender::M } else { Gender::F };
        subjects.push(Subject {
            subject_id,
            age,
            gender,
            enrollment_date: enrollment_date(config, rng),
            site_id: rng.random_range(config.site_min..=config.site_max),
            treatment_arm: random_arm(rng),
        });
    }

    let adverse_events = EventGenerator::new(config)?.generate(&subjects, rng);
    info!(
        subjects = subjects.len(),
        events = adverse_events.len(),
        "synthesized canonical tables"
    );
    Ok(CanonicalTables {
        subjects,
        adverse_events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded_rng;

    #[test]
    fn ids_are_sequential() {
        let config = TransformConfig::default();
        let tables = synthesize(5, &config, &mut seeded_rng(Some(42))).unwrap();
        let ids: Vec<_> = tables.subjects.iter().map(|s| s.subject_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn zero_subjects_is_empty() {
        let config = TransformConfig::default();
        let tables = synthesize(0, &config, &mut seeded_rng(Some(42))).unwrap();
        assert_eq!(tables, CanonicalTables::default());
    }
}
