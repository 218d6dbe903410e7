use trial_model::{FindingSeverity, TableName};

use super::registry::Rule;
use crate::checks::Check;

/// The protocol rule set, in evaluation order.
///
/// `ae_terms` is the adverse event vocabulary used by `term_vocabulary`.
pub fn default_rules(ae_terms: &[String]) -> Vec<Rule> {
    vec![
        Rule::new(
            "age_range",
            TableName::Demographics,
            Check::IntRange {
                column: "age".to_string(),
                min: Some(18),
                max: Some(90),
            },
            FindingSeverity::Error,
            "{count} subjects with invalid age",
        ),
        Rule::new(
            "subject_id_unique",
            TableName::Demographics,
            Check::Unique {
                column: "subject_id".to_string(),
            },
            FindingSeverity::Error,
            "{count} duplicate subject identifiers",
        ),
        Rule::new(
            "site_id_positive",
            TableName::Demographics,
            Check::IntRange {
                column: "site_id".to_string(),
                min: Some(1),
                max: None,
            },
            FindingSeverity::Error,
            "{count} subjects with invalid site",
        ),
        Rule::new(
            "subject_reference",
            TableName::AdverseEvents,
            Check::ForeignKey {
                column: "subject_id".to_string(),
                references: TableName::Demographics,
                referenced_column: "subject_id".to_string(),
            },
            FindingSeverity::Error,
            "{count} events reference unknown subjects",
        ),
        Rule::new(
            "onset_after_enrollment",
            TableName::AdverseEvents,
            Check::NotBeforeReference {
                column: "onset_date".to_string(),
                key: "subject_id".to_string(),
                references: TableName::Demographics,
                referenced_key: "subject_id".to_string(),
                referenced_column: "enrollment_date".to_string(),
            },
            FindingSeverity::Error,
            "{count} events start before enrollment",
        ),
        Rule::new(
            "term_vocabulary",
            TableName::AdverseEvents,
            Check::AllowedValues {
                column: "ae_term".to_string(),
                values: ae_terms.to_vec(),
            },
            FindingSeverity::Warning,
            "{count} events with unlisted {column}",
        ),
    ]
}
