//! Canonical table invariants over joined and synthetic input.

use polars::prelude::*;
use proptest::prelude::*;
use trial_ingest::LoadedSources;
use trial_model::CanonicalTables;
use trial_transform::{
    AGE_MAX, AGE_MIN, SchemaTransformer, TransformConfig, TransformError, seeded_rng, synthesize,
};

fn sources(patients: DataFrame, admissions: DataFrame) -> LoadedSources {
    let mut loaded = LoadedSources::default();
    loaded.tables.insert("patients".to_string(), patients);
    loaded.tables.insert("admissions".to_string(), admissions);
    loaded
}

/// `n` subjects with de-identified (shifted) birth dates and one admission each.
fn raw_sources(n: i64) -> LoadedSources {
    let ids: Vec<i64> = (1..=n).collect();
    let genders: Vec<&str> = ids
        .iter()
        .map(|id| if id % 2 == 0 { "F" } else { "M" })
        .collect();
    let dobs: Vec<String> = ids
        .iter()
        .map(|id| format!("{}-03-13 00:00:00", 1700 + id * 4))
        .collect();
    let patients = df! {
        "subject_id" => ids.clone(),
        "gender" => genders,
        "dob" => dobs,
    }
    .unwrap();
    let admissions = df! {
        "subject_id" => ids,
    }
    .unwrap();
    sources(patients, admissions)
}

fn assert_invariants(tables: &CanonicalTables) {
    for subject in &tables.subjects {
        assert!((AGE_MIN..=AGE_MAX).contains(&subject.age));
        assert!((1..=5).contains(&subject.site_id));
    }
    assert!(tables.orphan_events().is_empty());
    for subject in &tables.subjects {
        for event in tables.events_for(subject.subject_id) {
            assert!(event.onset_date > subject.enrollment_date);
        }
    }
}

#[test]
fn transformed_tables_hold_invariants() {
    let transformer = SchemaTransformer::new(TransformConfig::default()).unwrap();
    let (tables, stats) = transformer
        .transform(&raw_sources(100), &mut seeded_rng(Some(42)))
        .unwrap();

    assert_eq!(tables.subjects.len(), 100);
    assert_eq!(stats.joined, 100);
    assert_eq!(stats.dropped, 0);
    assert_eq!(stats.events, tables.adverse_events.len());
    assert_invariants(&tables);
}

#[test]
fn same_seed_same_tables() {
    let transformer = SchemaTransformer::new(TransformConfig::default()).unwrap();
    let input = raw_sources(30);
    let (a, _) = transformer.transform(&input, &mut seeded_rng(Some(9))).unwrap();
    let (b, _) = transformer.transform(&input, &mut seeded_rng(Some(9))).unwrap();
    assert_eq!(a, b);
}

#[test]
fn unusable_rows_are_dropped_and_counted() {
    let patients = df! {
        "SUBJECT_ID" => [1i64, 2, 3, 4],
        "GENDER" => [Some("M"), Some("X"), None, Some("F")],
        "DOB" => ["1950-01-01", "1950-01-01", "1950-01-01", "unknown"],
    }
    .unwrap();
    let admissions = df! { "SUBJECT_ID" => [1i64, 2, 3, 4, 4] }.unwrap();

    let transformer = SchemaTransformer::new(TransformConfig::default()).unwrap();
    let (tables, stats) = transformer
        .transform(&sources(patients, admissions), &mut seeded_rng(Some(1)))
        .unwrap();

    assert_eq!(stats.patients, 4);
    assert_eq!(stats.admissions, 5);
    assert_eq!(stats.joined, 4);
    assert_eq!(stats.dropped, 3);
    assert_eq!(stats.subjects(), 1);
    assert_eq!(tables.subjects[0].subject_id, 1);
    assert_eq!(tables.subjects[0].age, 73);
}

#[test]
fn missing_admissions_table_is_fatal() {
    let mut loaded = raw_sources(3);
    loaded.tables.remove("admissions");
    let transformer = SchemaTransformer::new(TransformConfig::default()).unwrap();
    let err = transformer
        .transform(&loaded, &mut seeded_rng(Some(1)))
        .unwrap_err();
    assert!(matches!(err, TransformError::MissingTable { table } if table == "admissions"));
}

#[test]
fn calendar_overflow_is_a_config_error() {
    let config = TransformConfig {
        enrollment_start: chrono::NaiveDate::MAX,
        ..TransformConfig::default()
    };
    let err = synthesize(5, &config, &mut seeded_rng(Some(3))).unwrap_err();
    assert!(matches!(err, TransformError::InvalidConfig { .. }));
    assert!(SchemaTransformer::new(config).is_err());
}

#[test]
fn event_count_mean_is_near_two() {
    let transformer = SchemaTransformer::new(TransformConfig::default()).unwrap();
    let input = raw_sources(100);
    let mut subjects = 0usize;
    let mut events = 0usize;
    for seed in 0..50 {
        let (tables, _) = transformer
            .transform(&input, &mut seeded_rng(Some(seed)))
            .unwrap();
        subjects += tables.subjects.len();
        events += tables.adverse_events.len();
    }
    let mean = events as f64 / subjects as f64;
    assert!((mean - 2.0).abs() < 0.15, "mean {mean}");
}

#[test]
fn synthetic_event_mean_is_near_two() {
    let config = TransformConfig::default();
    let tables = synthesize(10_000, &config, &mut seeded_rng(Some(42))).unwrap();
    let mean = tables.adverse_events.len() as f64 / tables.subjects.len() as f64;
    assert!((mean - 2.0).abs() < 0.1, "mean {mean}");
    assert_invariants(&tables);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn synthetic_tables_hold_invariants(seed in any::<u64>(), count in 0usize..200) {
        let config = TransformConfig::default();
        let tables = synthesize(count, &config, &mut seeded_rng(Some(seed))).unwrap();
        prop_assert_eq!(tables.subjects.len(), count);
        assert_invariants(&tables);
    }
}
