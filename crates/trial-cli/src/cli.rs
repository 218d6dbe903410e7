//! Command-line arguments of the `trial` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use trial_cli::config::{DataSourceKind, PipelineConfig};

#[derive(Parser)]
#[command(
    name = "trial",
    version,
    about = "Clinical trial data pipeline",
    long_about = "Reshape de-identified encounter extracts into canonical trial tables,\n\
                  validate them against protocol rules and export DM/AE submission domains."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Pipeline settings file (default: ./trial.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow subject identifiers in trace output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run ingest, transform, store, validate, map and export.
    Run(RunArgs),

    /// Validate canonical tables from the configured data source.
    Validate(ValidateArgs),

    /// Map and export the DM and AE domains.
    Export(SourceArgs),

    /// List canonical tables in the store with row counts.
    Tables(SourceArgs),
}

/// Flags that override values from the settings file.
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Seed for every random draw.
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    #[arg(long = "raw-dir", value_name = "DIR")]
    pub raw_dir: Option<PathBuf>,

    #[arg(long = "store-dir", value_name = "DIR")]
    pub store_dir: Option<PathBuf>,

    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[arg(long = "study-id")]
    pub study_id: Option<String>,

    /// Generate N subjects instead of reading raw extracts or the store.
    #[arg(long = "synthetic", value_name = "N")]
    pub synthetic: Option<usize>,
}

impl SourceArgs {
    pub fn apply(&self, config: &mut PipelineConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(dir) = &self.raw_dir {
            config.raw_dir.clone_from(dir);
        }
        if let Some(dir) = &self.store_dir {
            config.store_dir.clone_from(dir);
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        if let Some(study_id) = &self.study_id {
            config.study_id.clone_from(study_id);
        }
        if let Some(subjects) = self.synthetic {
            config.data_source = DataSourceKind::Synthetic;
            config.synthetic_subjects = subjects;
        }
    }
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Exit with status 1 when validation reports Error findings.
    #[arg(long = "fail-on-findings")]
    pub fail_on_findings: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the report as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,

    /// Exit with status 1 when the report contains Error findings.
    #[arg(long = "fail-on-findings")]
    pub fail_on_findings: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
