use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::finding::ValidationReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageName {
    Ingest,
    Transform,
    Store,
    Validate,
    Map,
    Export,
}

impl StageName {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageName::Ingest => "ingest",
            StageName::Transform => "transform",
            StageName::Store => "store",
            StageName::Validate => "validate",
            StageName::Map => "map",
            StageName::Export => "export",
        }
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Succeeded,
    Failed,
    /// Not reached because an earlier stage failed.
    Skipped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageOutcome {
    pub stage: StageName,
    pub status: StageStatus,
    /// Rows produced or written by the stage, when meaningful.
    pub records: Option<usize>,
    pub detail: Option<String>,
    pub duration_ms: u128,
}

/// Final status of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: String,
    pub study_id: String,
    pub stages: Vec<StageOutcome>,
    pub skipped_sources: Vec<PathBuf>,
    pub validation: Option<ValidationReport>,
    pub exports: Vec<PathBuf>,
}

impl RunSummary {
    pub fn new(run_id: impl Into<String>, study_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            study_id: study_id.into(),
            stages: Vec::new(),
            skipped_sources: Vec::new(),
            validation: None,
            exports: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: StageOutcome) {
        self.stages.push(outcome);
    }

    /// Mark every stage in `stages` that has no outcome yet as skipped.
    pub fn skip_remaining(&mut self, stages: &[StageName]) {
        for stage in stages {
            if self.outcome(*stage).is_none() {
                self.stages.push(StageOutcome {
                    stage: *stage,
                    status: StageStatus::Skipped,
                    records: None,
                    detail: None,
                    duration_ms: 0,
                });
            }
        }
    }

    pub fn outcome(&self, stage: StageName) -> Option<&StageOutcome> {
        self.stages.iter().find(|outcome| outcome.stage == stage)
    }

    /// True when no stage failed. Stages skipped by configuration, such as
    /// ingest for a synthetic run, do not count as failures.
    pub fn succeeded(&self) -> bool {
        self.failed_stage().is_none()
    }

    pub fn failed_stage(&self) -> Option<StageName> {
        self.stages
            .iter()
            .find(|outcome| outcome.status == StageStatus::Failed)
            .map(|outcome| outcome.stage)
    }
}
