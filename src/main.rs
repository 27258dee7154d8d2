//! slopecycle CLI - cycle analysis for a block on a frictional slope
//!
//! Command-line interface for comparing recorded runs with the model.

use std::process::ExitCode;

use slopecycle::cli::{load_config, run_cli, Args};
use slopecycle::logging::init_logging;

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(verbose) = args.command.verbose() {
        let log = load_config(args.command.config_path())
            .map(|config| config.log)
            .unwrap_or_default();
        if let Err(e) = init_logging(&log, verbose) {
            eprintln!("Warning: {e}");
        }
    }

    run_cli(args)
}
