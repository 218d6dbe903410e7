//! One end-to-end run: ingest, transform, store, validate, map, export.
//!
//! Each run owns its span and its [`RunSummary`]. Stages execute in order
//! inside child spans; the first failing stage is recorded with its error and
//! every stage after it is marked skipped. Tables already written to the store
//! by earlier stages stay as they are.

use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{Span, debug, error, info, info_span, trace, warn};
use trial_ingest::SourceLoader;
use trial_map::DomainMapper;
use trial_model::{CanonicalTables, DomainTable, RunSummary, StageName, StageOutcome, StageStatus};
use trial_output::{export_domains, write_validation_report};
use trial_store::{CanonicalStore, DataSource};
use trial_transform::{SchemaTransformer, seeded_rng, synthesize};
use trial_validate::{RuleRegistry, Validator, default_rules, load_rules};

use crate::config::PipelineConfig;
use crate::logging::redact_value;

/// Stages in execution order.
pub const STAGES: [StageName; 6] = [
    StageName::Ingest,
    StageName::Transform,
    StageName::Store,
    StageName::Validate,
    StageName::Map,
    StageName::Export,
];

/// Result of [`run_pipeline`]: the summary is always present, the error only
/// when a stage failed.
#[derive(Debug)]
pub struct PipelineRun {
    pub summary: RunSummary,
    pub error: Option<anyhow::Error>,
}

impl PipelineRun {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Run every stage against `store`.
///
/// With a synthetic data source the ingest stage is skipped and the transform
/// stage generates the tables instead of reading raw extracts.
pub fn run_pipeline<S: CanonicalStore>(config: &PipelineConfig, store: &mut S) -> PipelineRun {
    let run_id = new_run_id();
    let span = info_span!("pipeline", run_id = %run_id, study_id = %config.study_id);
    let _guard = span.enter();
    info!(seed = ?config.seed, data_source = ?config.data_source, "pipeline started");

    let mut summary = RunSummary::new(run_id, config.study_id.clone());
    let error = execute(config, store, &mut summary).err();
    summary.skip_remaining(&STAGES);

    match &error {
        Some(error) => error!(error = %format!("{error:#}"), "pipeline failed"),
        None => info!(
            exports = summary.exports.len(),
            findings = summary.validation.as_ref().map_or(0, |r| r.findings.len()),
            "pipeline finished"
        ),
    }
    PipelineRun { summary, error }
}

/// The rule set a run validates with: built-ins, then any extra rule file.
pub fn build_validator(config: &PipelineConfig) -> Result<Validator> {
    let mut rules = default_rules(&config.transform.vocabulary());
    if let Some(path) = &config.rules_file {
        let extra = load_rules(path)
            .with_context(|| format!("load rules from {}", path.display()))?;
        debug!(path = %path.display(), rules = extra.len(), "loaded extra rules");
        rules.extend(extra);
    }
    Ok(Validator::new(RuleRegistry::from_rules(rules)?))
}

fn execute<S: CanonicalStore>(
    config: &PipelineConfig,
    store: &mut S,
    summary: &mut RunSummary,
) -> Result<()> {
    let mut rng = seeded_rng(config.seed);

    let tables = match config.data_source() {
        DataSource::Synthetic { subjects, .. } => {
            summary.record(StageOutcome {
                stage: StageName::Ingest,
                status: StageStatus::Skipped,
                records: None,
                detail: Some("synthetic data source".to_string()),
                duration_ms: 0,
            });
            run_stage(summary, StageName::Transform, || {
                let tables = synthesize(subjects, &config.transform, &mut rng)?;
                let records = tables.subjects.len();
                Ok((tables, Some(records)))
            })?
        }
        DataSource::Persisted => {
            let sources = run_stage(summary, StageName::Ingest, || {
                let sources = SourceLoader::new(&config.raw_dir)
                    .with_expected(&config.source_files)
                    .load()?;
                let rows = sources.total_rows();
                Ok((sources, Some(rows)))
            })?;
            summary.skipped_sources = sources
                .skipped
                .iter()
                .map(|skipped| skipped.path.clone())
                .collect();

            run_stage(summary, StageName::Transform, || {
                let transformer = SchemaTransformer::new(config.transform.clone())?;
                let (tables, stats) = transformer.transform(&sources, &mut rng)?;
                if stats.dropped > 0 {
                    warn!(dropped = stats.dropped, "subjects dropped during transform");
                }
                Ok((tables, Some(stats.subjects())))
            })?
        }
    };
    trace_subjects(&tables);

    run_stage(summary, StageName::Store, || {
        store.save_tables(&tables)?;
        Ok(((), Some(tables.subjects.len() + tables.adverse_events.len())))
    })?;

    let report = run_stage(summary, StageName::Validate, || {
        let validator = build_validator(config)?;
        let report = validator.run_all(&*store)?;
        let findings = report.findings.len();
        Ok((report, Some(findings)))
    })?;
    summary.validation = Some(report.clone());

    let domains = run_stage(summary, StageName::Map, || {
        let tables = store.load_tables()?;
        let domains = DomainMapper::new(&config.study_id).map_all(&tables);
        let rows = domains.iter().map(DomainTable::len).sum();
        Ok((domains, Some(rows)))
    })?;

    let exports = run_stage(summary, StageName::Export, || {
        let mut paths = export_domains(&domains, &config.output_dir)?;
        paths.push(write_validation_report(&report, &config.output_dir)?);
        let files = paths.len();
        Ok((paths, Some(files)))
    })?;
    summary.exports = exports;
    Ok(())
}

/// Execute `work` inside the stage span and record its outcome.
fn run_stage<T>(
    summary: &mut RunSummary,
    stage: StageName,
    work: impl FnOnce() -> Result<(T, Option<usize>)>,
) -> Result<T> {
    let span = stage_span(stage);
    let _guard = span.enter();
    let start = Instant::now();
    debug!("stage started");

    let result = work();
    let duration_ms = start.elapsed().as_millis();
    match result {
        Ok((value, records)) => {
            info!(records = ?records, duration_ms, "stage finished");
            summary.record(StageOutcome {
                stage,
                status: StageStatus::Succeeded,
                records,
                detail: None,
                duration_ms,
            });
            Ok(value)
        }
        Err(error) => {
            let detail = format!("{error:#}");
            error!(error = %detail, duration_ms, "stage failed");
            summary.record(StageOutcome {
                stage,
                status: StageStatus::Failed,
                records: None,
                detail: Some(detail),
                duration_ms,
            });
            Err(error.context(format!("{stage} stage failed")))
        }
    }
}

fn stage_span(stage: StageName) -> Span {
    match stage {
        StageName::Ingest => info_span!("ingest"),
        StageName::Transform => info_span!("transform"),
        StageName::Store => info_span!("store"),
        StageName::Validate => info_span!("validate"),
        StageName::Map => info_span!("map"),
        StageName::Export => info_span!("export"),
    }
}

fn trace_subjects(tables: &CanonicalTables) {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }
    for subject in &tables.subjects {
        trace!(
            subject_id = redact_value(&subject.subject_id.to_string()),
            age = subject.age,
            site_id = subject.site_id,
            events = tables.events_for(subject.subject_id).count(),
            "canonical subject"
        );
    }
}

fn new_run_id() -> String {
    Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use trial_model::TableName;
    use trial_store::MemoryStore;

    use crate::config::DataSourceKind;

    fn synthetic_config(subjects: usize, output: &tempfile::TempDir) -> PipelineConfig {
        PipelineConfig {
            data_source: DataSourceKind::Synthetic,
            synthetic_subjects: subjects,
            seed: Some(11),
            output_dir: output.path().join("sdtm"),
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn synthetic_run_skips_ingest_and_succeeds() {
        let output = tempfile::tempdir().unwrap();
        let config = synthetic_config(12, &output);
        let mut store = MemoryStore::new();
        let run = run_pipeline(&config, &mut store);

        assert!(run.succeeded(), "{:?}", run.error);
        assert!(run.summary.succeeded());
        assert_eq!(
            run.summary.outcome(StageName::Ingest).map(|o| o.status),
            Some(StageStatus::Skipped)
        );
        assert_eq!(
            run.summary.outcome(StageName::Transform).and_then(|o| o.records),
            Some(12)
        );
        assert_eq!(run.summary.exports.len(), 3);
        let order: Vec<_> = run.summary.stages.iter().map(|o| o.stage).collect();
        assert_eq!(order, STAGES);
    }

    #[test]
    fn bad_rules_file_fails_validate_stage() {
        let output = tempfile::tempdir().unwrap();
        let mut config = synthetic_config(3, &output);
        config.rules_file = Some(output.path().join("missing-rules.toml"));
        let mut store = MemoryStore::new();
        let run = run_pipeline(&config, &mut store);

        assert!(!run.succeeded());
        assert_eq!(run.summary.failed_stage(), Some(StageName::Validate));
        for stage in [StageName::Map, StageName::Export] {
            assert_eq!(
                run.summary.outcome(stage).map(|o| o.status),
                Some(StageStatus::Skipped)
            );
        }
        assert!(store.contains(TableName::Demographics));
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn padded_terms_do_not_raise_vocabulary_warnings() {
        let output = tempfile::tempdir().unwrap();
        let mut config = synthetic_config(40, &output);
        config.transform.ae_terms = vec![" Rash".to_string(), "Nausea ".to_string()];
        let mut store = MemoryStore::new();
        let run = run_pipeline(&config, &mut store);

        assert!(run.succeeded(), "{:?}", run.error);
        let tables = store.load_tables().unwrap();
        assert!(!tables.adverse_events.is_empty());
        let report = run.summary.validation.as_ref().unwrap();
        assert!(report.finding("term_vocabulary").is_none(), "{report:?}");
    }

    #[test]
    fn extra_rules_are_appended_after_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let rules = dir.path().join("rules.toml");
        std::fs::write(
            &rules,
            r#"
            [[rule]]
            id = "elderly_cohort"
            table = "demographics"
            severity = "Warning"
            message = "{count} subjects older than 85"
            check = { kind = "int_range", column = "age", max = 85 }
            "#,
        )
        .unwrap();
        let config = PipelineConfig {
            rules_file: Some(rules),
            ..PipelineConfig::default()
        };
        let validator = build_validator(&config).unwrap();
        let ids: Vec<_> = validator.registry().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), 7);
        assert_eq!(ids[0], "age_range");
        assert_eq!(ids[6], "elderly_cohort");
    }
}
