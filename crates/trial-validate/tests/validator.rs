//! Validator behaviour over hand-built canonical tables.

use chrono::NaiveDate;
use trial_model::{
    AdverseEvent, AeSeverity, CanonicalTables, FindingSeverity, Gender, Relatedness, Subject,
    TableName, TreatmentArm,
};
use trial_store::{CanonicalStore, MemoryStore, StoreError};
use trial_validate::{Check, Rule, RuleRegistry, ValidateError, Validator, default_rules};

fn terms() -> Vec<String> {
    ["Nausea", "Fatigue", "Headache"]
        .map(String::from)
        .to_vec()
}

fn validator() -> Validator {
    Validator::new(RuleRegistry::from_rules(default_rules(&terms())).unwrap())
}

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, m, d).unwrap()
}

fn subject(id: i64, age: i32) -> Subject {
    Subject {
        subject_id: id,
        age,
        gender: Gender::F,
        enrollment_date: date(3, 1),
        site_id: 1,
        treatment_arm: TreatmentArm::Active,
    }
}

fn event(id: i64, term: &str, onset: NaiveDate) -> AdverseEvent {
    AdverseEvent {
        subject_id: id,
        ae_term: term.to_string(),
        severity: AeSeverity::Severe,
        onset_date: onset,
        related_to_study_drug: Relatedness::Yes,
    }
}

fn clean_tables() -> CanonicalTables {
    CanonicalTables {
        subjects: vec![subject(1, 45), subject(2, 67)],
        adverse_events: vec![
            event(1, "Nausea", date(3, 2)),
            event(2, "Headache", date(8, 28)),
        ],
    }
}

#[test]
fn clean_tables_pass_every_rule() {
    let report = validator().evaluate(&clean_tables());
    assert!(report.is_clean());
}

#[test]
fn underage_subject_gives_one_age_error() {
    let mut tables = clean_tables();
    tables.subjects.push(subject(3, 10));

    let report = validator().evaluate(&tables);

    assert_eq!(report.findings.len(), 1);
    let finding = &report.findings[0];
    assert_eq!(finding.rule, "age_range");
    assert_eq!(finding.table, TableName::Demographics);
    assert_eq!(finding.severity, FindingSeverity::Error);
    assert_eq!(finding.violation_count, 1);
    assert_eq!(finding.message, "1 subjects with invalid age");
}

#[test]
fn findings_follow_registration_order() {
    let mut tables = clean_tables();
    tables.subjects.push(subject(1, 150));
    tables.adverse_events.push(event(9, "Rash", date(4, 1)));
    tables.adverse_events.push(event(2, "Nausea", date(2, 1)));

    let report = validator().evaluate(&tables);
    let rules: Vec<_> = report.findings.iter().map(|f| f.rule.as_str()).collect();
    assert_eq!(
        rules,
        vec![
            "age_range",
            "subject_id_unique",
            "subject_reference",
            "onset_after_enrollment",
            "term_vocabulary",
        ]
    );
    assert_eq!(report.error_count(), 4);
    assert_eq!(report.warning_count(), 1);
    assert_eq!(report.finding("term_vocabulary").unwrap().violation_count, 1);
}

#[test]
fn report_serializes_as_structured_data() {
    let mut tables = clean_tables();
    tables.subjects.push(subject(3, 10));
    let report = validator().evaluate(&tables);
    insta::assert_json_snapshot!(report, @r#"
    {
      "findings": [
        {
          "table": "demographics",
          "rule": "age_range",
          "violations": 1,
          "severity": "Error",
          "message": "1 subjects with invalid age"
        }
      ]
    }
    "#);
}

#[test]
fn extra_rules_run_after_defaults() {
    let mut registry = RuleRegistry::from_rules(default_rules(&terms())).unwrap();
    registry
        .register(Rule::new(
            "age_over_50",
            TableName::Demographics,
            Check::IntRange {
                column: "age".to_string(),
                min: None,
                max: Some(50),
            },
            FindingSeverity::Warning,
            "{count} subjects older than 50",
        ))
        .unwrap();

    let report = Validator::new(registry).evaluate(&clean_tables());
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].message, "1 subjects older than 50");
}

#[test]
fn run_all_reads_from_store() {
    let mut store = MemoryStore::new();
    store.save_tables(&clean_tables()).unwrap();
    assert!(validator().run_all(&store).unwrap().is_clean());
}

#[test]
fn run_all_fails_on_missing_table() {
    let mut store = MemoryStore::new();
    store.save(&clean_tables().subjects).unwrap();
    let err = validator().run_all(&store).unwrap_err();
    assert!(matches!(
        err,
        ValidateError::Store(StoreError::NotFound {
            table: TableName::AdverseEvents
        })
    ));
}

#[test]
fn site_zero_gives_one_site_error() {
    let mut tables = clean_tables();
    let mut unassigned = subject(3, 52);
    unassigned.site_id = 0;
    tables.subjects.push(unassigned);

    let report = validator().evaluate(&tables);

    assert_eq!(report.findings.len(), 1);
    let finding = report.finding("site_id_positive").unwrap();
    assert_eq!(finding.table, TableName::Demographics);
    assert_eq!(finding.severity, FindingSeverity::Error);
    assert_eq!(finding.violation_count, 1);
    assert_eq!(finding.message, "1 subjects with invalid site");
}

#[test]
fn required_term_counts_blank_values() {
    let registry = RuleRegistry::from_rules(vec![Rule::new(
        "ae_term_present",
        TableName::AdverseEvents,
        Check::Required {
            column: "ae_term".to_string(),
        },
        FindingSeverity::Error,
        "{count} events without {column}",
    )])
    .unwrap();
    let mut tables = clean_tables();
    tables.adverse_events.push(event(1, "", date(3, 5)));
    tables.adverse_events.push(event(2, "   ", date(9, 1)));

    let report = Validator::new(registry).evaluate(&tables);

    assert_eq!(report.findings.len(), 1);
    let finding = report.finding("ae_term_present").unwrap();
    assert_eq!(finding.violation_count, 2);
    assert_eq!(finding.message, "2 events without ae_term");
}
