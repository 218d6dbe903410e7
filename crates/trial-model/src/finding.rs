use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::TableName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingSeverity {
    /// Must be corrected before the data can be submitted.
    Error,
    /// Should be reviewed.
    Warning,
}

impl FindingSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            FindingSeverity::Error => "Error",
            FindingSeverity::Warning => "Warning",
        }
    }
}

impl fmt::Display for FindingSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one violated rule in one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub table: TableName,
    /// Rule identifier, e.g. `age_range`.
    pub rule: String,
    #[serde(rename = "violations")]
    pub violation_count: u64,
    pub severity: FindingSeverity,
    pub message: String,
}

/// Findings of a validation run, in rule registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub findings: Vec<ValidationFinding>,
}

impl ValidationReport {
    pub fn new(findings: Vec<ValidationFinding>) -> Self {
        Self { findings }
    }

    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == FindingSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == FindingSeverity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// True when every rule passed.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn finding(&self, rule: &str) -> Option<&ValidationFinding> {
        self.findings.iter().find(|finding| finding.rule == rule)
    }
}
