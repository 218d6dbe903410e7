//! `trial`: clinical trial data pipeline CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;
use trial_cli::config::PipelineConfig;
use trial_cli::logging::{LogConfig, LogFormat, init_logging};
use trial_model::ValidationReport;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, SourceArgs};
use crate::commands::{run_export, run_run, run_tables, run_validate};
use crate::summary::{print_exports, print_report, print_run_summary, print_tables};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match dispatch(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn dispatch(cli: &Cli) -> Result<i32> {
    match &cli.command {
        Command::Run(args) => {
            let config = load_config(cli, &args.source)?;
            let run = run_run(&config);
            print_run_summary(&run.summary);
            if let Some(error) = run.error {
                return Err(error);
            }
            let blocked = args.fail_on_findings
                && run
                    .summary
                    .validation
                    .as_ref()
                    .is_some_and(ValidationReport::has_errors);
            Ok(i32::from(blocked))
        }
        Command::Validate(args) => {
            let config = load_config(cli, &args.source)?;
            let report = run_validate(&config)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            Ok(i32::from(args.fail_on_findings && report.has_errors()))
        }
        Command::Export(args) => {
            let config = load_config(cli, args)?;
            print_exports(&run_export(&config)?);
            Ok(0)
        }
        Command::Tables(args) => {
            let config = load_config(cli, args)?;
            print_tables(&config.store_dir, &run_tables(&config)?);
            Ok(0)
        }
    }
}

/// Settings file first, then command-line overrides.
fn load_config(cli: &Cli, overrides: &SourceArgs) -> Result<PipelineConfig> {
    let mut config = PipelineConfig::load(cli.config.as_deref())?;
    overrides.apply(&mut config);
    Ok(config)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let mut config = LogConfig::default()
        .with_level_filter(level_filter)
        .with_format(format)
        .with_log_file(cli.log_file.clone())
        .with_log_data(cli.log_data);
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
