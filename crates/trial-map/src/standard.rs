//! Built-in DM and AE mappings.

use trial_model::{DomainCode, TableName};

use crate::mapping::{DomainMapping, FieldMapping, FieldSource};

/// Digits of the subject number inside `USUBJID`.
pub const SUBJECT_KEY_WIDTH: usize = 4;

fn constant(value: &str) -> FieldSource {
    FieldSource::Constant {
        value: value.to_string(),
    }
}

fn column(name: &str) -> String {
    name.to_string()
}

fn subject_key() -> FieldSource {
    FieldSource::SubjectKey {
        column: column("subject_id"),
        width: SUBJECT_KEY_WIDTH,
    }
}

/// Demographics: one row per canonical subject.
pub fn dm_mapping(study_id: &str) -> DomainMapping {
    DomainMapping {
        domain: DomainCode::Dm,
        source_table: TableName::Demographics,
        study_id: study_id.to_string(),
        fields: vec![
            FieldMapping::required("STUDYID", constant(study_id)),
            FieldMapping::required("DOMAIN", constant(DomainCode::Dm.as_str())),
            FieldMapping::required("USUBJID", subject_key()),
            FieldMapping::required(
                "SUBJID",
                FieldSource::Copy {
                    column: column("subject_id"),
                },
            ),
            FieldMapping::required(
                "RFSTDTC",
                FieldSource::IsoDate {
                    column: column("enrollment_date"),
                },
            ),
            FieldMapping::required(
                "AGE",
                FieldSource::Copy {
                    column: column("age"),
                },
            ),
            FieldMapping::required("AGEU", constant("YEARS")),
            FieldMapping::required(
                "SEX",
                FieldSource::Text {
                    column: column("gender"),
                },
            ),
            FieldMapping::required(
                "ARM",
                FieldSource::Text {
                    column: column("treatment_arm"),
                },
            ),
        ],
    }
}

/// Adverse events: one row per canonical event, numbered per subject.
pub fn ae_mapping(study_id: &str) -> DomainMapping {
    DomainMapping {
        domain: DomainCode::Ae,
        source_table: TableName::AdverseEvents,
        study_id: study_id.to_string(),
        fields: vec![
            FieldMapping::required("STUDYID", constant(study_id)),
            FieldMapping::required("DOMAIN", constant(DomainCode::Ae.as_str())),
            FieldMapping::required("USUBJID", subject_key()),
            FieldMapping::required(
                "AESEQ",
                FieldSource::Sequence {
                    key: column("subject_id"),
                },
            ),
            FieldMapping::required(
                "AETERM",
                FieldSource::Text {
                    column: column("ae_term"),
                },
            ),
            FieldMapping::optional(
                "AESEV",
                FieldSource::Upper {
                    column: column("severity"),
                },
            ),
            FieldMapping::optional(
                "AEREL",
                FieldSource::Upper {
                    column: column("related_to_study_drug"),
                },
            ),
            FieldMapping::required(
                "AESTDTC",
                FieldSource::IsoDate {
                    column: column("onset_date"),
                },
            ),
        ],
    }
}
