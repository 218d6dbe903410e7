//! Pipeline settings loaded from `trial.toml`.
//!
//! Every field has a default, so the file only needs the values that differ.
//! Command-line flags are applied on top of whatever the file provided.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use trial_ingest::DEFAULT_SOURCE_FILES;
use trial_store::DataSource;
use trial_transform::TransformConfig;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "trial.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    #[default]
    Persisted,
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub study_id: String,
    pub raw_dir: PathBuf,
    pub store_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Seed for every random draw of a run; unset means a fresh seed per run.
    pub seed: Option<u64>,
    pub source_files: Vec<String>,
    /// Where `validate`, `export` and `tables` read canonical tables from.
    pub data_source: DataSourceKind,
    /// Subjects generated when the data source is synthetic.
    pub synthetic_subjects: usize,
    /// Extra rules appended to the built-in set.
    pub rules_file: Option<PathBuf>,
    pub transform: TransformConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            study_id: "DEMO-001".to_string(),
            raw_dir: PathBuf::from("data/raw"),
            store_dir: PathBuf::from("data/canonical"),
            output_dir: PathBuf::from("output/sdtm"),
            seed: None,
            source_files: DEFAULT_SOURCE_FILES
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
            data_source: DataSourceKind::default(),
            synthetic_subjects: 100,
            rules_file: None,
            transform: TransformConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load settings.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read when present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                match fs::read_to_string(path) {
                    Ok(content) => Self::parse(&content, path),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {
                        debug!(path = %path.display(), "no config file, using defaults");
                        Ok(Self::default())
                    }
                    Err(e) => Err(e)
                        .with_context(|| format!("read config {}", path.display())),
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .with_context(|| format!("parse config {}", path.display()))?;
        info!(path = %path.display(), study_id = %config.study_id, "loaded config");
        Ok(config)
    }

    /// The configured canonical table source.
    pub fn data_source(&self) -> DataSource {
        match self.data_source {
            DataSourceKind::Persisted => DataSource::Persisted,
            DataSourceKind::Synthetic => DataSource::Synthetic {
                subjects: self.synthetic_subjects,
                seed: self.seed,
            },
        }
    }
}
