use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, info_span};
use trial_cli::config::PipelineConfig;
use trial_cli::pipeline::{PipelineRun, build_validator, run_pipeline};
use trial_map::DomainMapper;
use trial_model::{TableName, ValidationReport};
use trial_output::export_domains;
use trial_store::{CanonicalStore, FileStore, open_tables};

pub fn run_run(config: &PipelineConfig) -> PipelineRun {
    let mut store = FileStore::new(&config.store_dir);
    run_pipeline(config, &mut store)
}

pub fn run_validate(config: &PipelineConfig) -> Result<ValidationReport> {
    let span = info_span!("validate", study_id = %config.study_id);
    let _guard = span.enter();

    let store = FileStore::new(&config.store_dir);
    let tables = open_tables(config.data_source(), &store, &config.transform)
        .with_context(|| format!("open canonical tables in {}", config.store_dir.display()))?;
    let validator = build_validator(config)?;
    Ok(validator.evaluate(&tables))
}

pub fn run_export(config: &PipelineConfig) -> Result<Vec<PathBuf>> {
    let span = info_span!("export", study_id = %config.study_id);
    let _guard = span.enter();

    let store = FileStore::new(&config.store_dir);
    let tables = open_tables(config.data_source(), &store, &config.transform)
        .with_context(|| format!("open canonical tables in {}", config.store_dir.display()))?;
    let domains = DomainMapper::new(&config.study_id).map_all(&tables);
    let paths = export_domains(&domains, &config.output_dir)
        .with_context(|| format!("export domains to {}", config.output_dir.display()))?;
    info!(files = paths.len(), "export complete");
    Ok(paths)
}

pub fn run_tables(config: &PipelineConfig) -> Result<Vec<(TableName, Option<usize>)>> {
    let store = FileStore::new(&config.store_dir);
    TableName::ALL
        .iter()
        .map(|name| {
            if !store.contains(*name) {
                return Ok((*name, None));
            }
            let contents = store
                .load_by_name(name.as_str())
                .with_context(|| format!("load table {name}"))?;
            Ok((*name, Some(contents.len())))
        })
        .collect()
}
