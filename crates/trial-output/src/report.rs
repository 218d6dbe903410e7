use std::path::{Path, PathBuf};

use trial_model::ValidationReport;

use crate::common::write_atomic;
use crate::error::Result;

pub const REPORT_FILE_NAME: &str = "validation_report.json";

/// Write `report` as pretty JSON to `output_dir/validation_report.json`.
pub fn write_validation_report(report: &ValidationReport, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(REPORT_FILE_NAME);
    let mut bytes = serde_json::to_vec_pretty(report)?;
    bytes.push(b'\n');
    write_atomic(&path, &bytes)?;
    tracing::debug!(path = %path.display(), findings = report.findings.len(), "wrote validation report");
    Ok(path)
}
