//! CLI command handlers.
//!
//! This module contains the execution logic for each CLI command.
//! Extracted to enable comprehensive testing of command behavior.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use super::args::LaunchOverrides;
use super::output::{
    print_help, print_model_table, print_report_summary, print_run_plan, print_version,
};
use super::{Args, Command};
use crate::analysis::{AnalysisEngine, AnalysisReport};
use crate::config::{AnalysisConfig, OutputFormat};
use crate::error::{SlopeError, SlopeResult};
use crate::events::EventLog;
use crate::launch::{LaunchConditions, RunPlan};
use crate::output::ReportExporter;

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Analyze {
            events_path,
            config_path,
            output_path,
            format,
            launch,
            verbose,
        } => run_analysis(
            &events_path,
            config_path.as_deref(),
            output_path.as_deref(),
            format,
            &launch,
            verbose,
        ),
        Command::Model {
            config_path,
            launch,
            verbose,
        } => show_model(config_path.as_deref(), &launch, verbose),
        Command::InitConfig { path } => init_config(&path),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Load the configuration for a command.
///
/// With an explicit path the file is read, or written with defaults when it
/// does not exist yet. Without a path the built-in defaults are used.
///
/// # Errors
///
/// Returns error if the file cannot be read, written or validated.
pub fn load_config(path: Option<&Path>) -> SlopeResult<AnalysisConfig> {
    path.map_or_else(
        || Ok(AnalysisConfig::default()),
        AnalysisConfig::load_or_generate,
    )
}

/// Resolve and check launch conditions from overrides and configuration.
///
/// # Errors
///
/// Returns [`SlopeError::InvalidLaunch`] if a value is missing or out of
/// bounds.
pub fn resolve_launch(
    config: &AnalysisConfig,
    overrides: &LaunchOverrides,
) -> SlopeResult<LaunchConditions> {
    let launch = overrides.resolve(config.launch.as_ref())?;
    LaunchConditions::from_config(&launch, &config.input)
}

/// Analyse a recorded run and export the report.
///
/// Returns the report and the path it was written to.
///
/// # Errors
///
/// Returns error if the launch conditions or event log are invalid, or the
/// report cannot be written.
pub fn analyze(
    config: &AnalysisConfig,
    events_path: &Path,
    output_path: Option<&Path>,
    format: Option<OutputFormat>,
    overrides: &LaunchOverrides,
) -> SlopeResult<(AnalysisReport, PathBuf)> {
    let launch = resolve_launch(config, overrides)?;
    let events = EventLog::load(events_path)?;

    let engine = AnalysisEngine::new(config.settings());
    let report = engine.run(&launch, &events)?;

    let format = format.unwrap_or(config.output.format);
    let path = output_path.map_or_else(|| config.output.path.clone(), Path::to_path_buf);
    ReportExporter::new(format).export(&report, &path)?;

    Ok((report, path))
}

/// Run the `analyze` command.
#[must_use]
pub fn run_analysis(
    events_path: &Path,
    config_path: Option<&Path>,
    output_path: Option<&Path>,
    format: Option<OutputFormat>,
    overrides: &LaunchOverrides,
    verbose: bool,
) -> ExitCode {
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              slopecycle - Cycle Analysis                      ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");

    println!("Analysing: {}\n", events_path.display());

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => return report_error(&e),
    };

    match analyze(&config, events_path, output_path, format, overrides) {
        Ok((report, path)) => {
            print_report_summary(&report, &path, &config.units, verbose);
            ExitCode::SUCCESS
        }
        Err(e) => report_error(&e),
    }
}

/// Run the `model` command.
#[must_use]
pub fn show_model(
    config_path: Option<&Path>,
    overrides: &LaunchOverrides,
    verbose: bool,
) -> ExitCode {
    let result = load_config(config_path).and_then(|config| {
        let launch = resolve_launch(&config, overrides)?;
        Ok((config, launch))
    });
    let (config, launch) = match result {
        Ok(resolved) => resolved,
        Err(e) => return report_error(&e),
    };

    let engine = AnalysisEngine::new(config.settings());
    let model = engine.model(&launch);
    let plan = RunPlan::from_model(&model);
    let engine_launch = launch.engine_launch(&config);
    info!(cycles = model.len(), ?plan, "model computed");

    print_model_table(&model, &config.units);
    if verbose {
        println!();
        print_run_plan(&plan, &engine_launch);
    }
    ExitCode::SUCCESS
}

/// Write a default configuration file. Existing files are left untouched.
#[must_use]
pub fn init_config(path: &Path) -> ExitCode {
    if path.exists() {
        eprintln!("✗ {} already exists", path.display());
        return ExitCode::from(1);
    }

    match AnalysisConfig::default().write(path) {
        Ok(()) => {
            println!("✓ Wrote default configuration to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => report_error(&e),
    }
}

fn report_error(error: &SlopeError) -> ExitCode {
    eprintln!("Error: {error}");
    if error.is_input_error() {
        eprintln!("Check the launch values and event log, then retry.");
    }
    ExitCode::from(1)
}
