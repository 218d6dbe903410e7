//! Tests for trial-model types.

use chrono::NaiveDate;
use trial_model::{
    AdverseEvent, AeSeverity, CanonicalTables, FindingSeverity, Gender, Relatedness, RunSummary,
    StageName, StageOutcome, StageStatus, Subject, TableName, TreatmentArm, ValidationFinding,
    ValidationReport,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn subject(id: i64) -> Subject {
    Subject {
        subject_id: id,
        age: 54,
        gender: Gender::M,
        enrollment_date: date(2023, 2, 1),
        site_id: 3,
        treatment_arm: TreatmentArm::Active,
    }
}

fn event(id: i64) -> AdverseEvent {
    AdverseEvent {
        subject_id: id,
        ae_term: "Nausea".to_string(),
        severity: AeSeverity::Mild,
        onset_date: date(2023, 2, 10),
        related_to_study_drug: Relatedness::Possibly,
    }
}

#[test]
fn report_counts_by_severity() {
    let report = ValidationReport::new(vec![
        ValidationFinding {
            table: TableName::Demographics,
            rule: "age_range".to_string(),
            violation_count: 2,
            severity: FindingSeverity::Error,
            message: "2 subjects with invalid age".to_string(),
        },
        ValidationFinding {
            table: TableName::AdverseEvents,
            rule: "term_vocabulary".to_string(),
            violation_count: 1,
            severity: FindingSeverity::Warning,
            message: "1 events with unlisted term".to_string(),
        },
    ]);
    assert_eq!(report.error_count(), 1);
    assert_eq!(report.warning_count(), 1);
    assert!(report.has_errors());
    assert!(!report.is_clean());
    assert_eq!(report.finding("age_range").unwrap().violation_count, 2);
}

#[test]
fn finding_serializes_with_table_name() {
    let finding = ValidationFinding {
        table: TableName::Demographics,
        rule: "age_range".to_string(),
        violation_count: 1,
        severity: FindingSeverity::Error,
        message: "1 subjects with invalid age".to_string(),
    };
    let json = serde_json::to_value(&finding).expect("serialize finding");
    assert_eq!(json["table"], "demographics");
    assert_eq!(json["violations"], 1);
    assert_eq!(json["severity"], "Error");

    let round: ValidationFinding = serde_json::from_value(json).expect("deserialize finding");
    assert_eq!(round, finding);
}

#[test]
fn orphan_events_are_detected() {
    let tables = CanonicalTables {
        subjects: vec![subject(1), subject(2)],
        adverse_events: vec![event(1), event(3)],
    };
    let orphans = tables.orphan_events();
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].subject_id, 3);
    assert_eq!(tables.events_for(1).count(), 1);
}

#[test]
fn run_summary_marks_unreached_stages() {
    let mut summary = RunSummary::new("run-1", "DEMO-001");
    summary.record(StageOutcome {
        stage: StageName::Ingest,
        status: StageStatus::Succeeded,
        records: Some(2),
        detail: None,
        duration_ms: 3,
    });
    summary.record(StageOutcome {
        stage: StageName::Transform,
        status: StageStatus::Failed,
        records: None,
        detail: Some("schema mismatch".to_string()),
        duration_ms: 1,
    });
    summary.skip_remaining(&[StageName::Ingest, StageName::Transform, StageName::Store]);

    assert_eq!(summary.stages.len(), 3);
    assert_eq!(
        summary.outcome(StageName::Store).map(|o| o.status),
        Some(StageStatus::Skipped)
    );
    assert_eq!(summary.failed_stage(), Some(StageName::Transform));
    assert!(!summary.succeeded());
}
