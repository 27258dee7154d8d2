//! CLI output formatting.
//!
//! This module contains all output formatting functions for the CLI.
//! Extracted to enable testing of output generation.

use std::fmt::Write as _;
use std::path::Path;

use crate::analysis::{AnalysisReport, CycleResult};
use crate::config::UnitLabels;
use crate::launch::{EngineLaunch, RunPlan};
use crate::math::Unit;

/// Version line, with the commit hash when the build captured one.
#[must_use]
pub fn version_string() -> String {
    match option_env!("GIT_HASH").filter(|hash| !hash.is_empty()) {
        Some(hash) => format!(
            "slopecycle {} ({})",
            env!("CARGO_PKG_VERSION"),
            &hash[..hash.len().min(12)]
        ),
        None => format!("slopecycle {}", env!("CARGO_PKG_VERSION")),
    }
}

/// Print version information.
pub fn print_version() {
    println!("{}", version_string());
}

/// Print help message.
pub fn print_help() {
    println!(
        r"slopecycle - Cycle analysis for a block sliding on a frictional slope

USAGE:
    slopecycle <COMMAND> [OPTIONS]

COMMANDS:
    analyze <events.json|yaml>  Compare a recorded run against the model
        -c, --config <path>     Configuration file (written with defaults if missing)
        -o, --output <path>     Report path (default from configuration)
        -f, --format <fmt>      Report format: csv or json
        --tilt <rad>            Slope tilt, 0 < tilt < pi/2
        --mass <kg>             Block mass
        --speed <m/s>           Launch speed along the slope
        --friction <mu>         Coulomb friction coefficient
        -v, --verbose           Enable verbose output

    model                       Print the predicted cycle sequence
        -c, --config <path>     Configuration file
        --tilt, --mass, --speed, --friction
                                Launch values, as for analyze
        -v, --verbose           Also print the engine run plan

    init-config <path>          Write a default configuration file

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    slopecycle model --tilt 0.785 --mass 1 --speed 20 --friction 0.3
    slopecycle analyze run.json --config config.yaml
    slopecycle analyze run.json --config config.yaml --format json -o report.json

Launch values missing on the command line are taken from the `launch`
section of the configuration file.
"
    );
}

/// Predicted cycle sequence as a table.
#[must_use]
pub fn format_model_table(model: &[CycleResult], units: &UnitLabels) -> String {
    let t = units.label(Unit::Time);
    let v = units.label(Unit::Velocity);
    let d = units.label(Unit::Distance);

    let mut table = String::new();
    let _ = writeln!(
        table,
        "{:>5} {:>5} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "cycle",
        "full",
        format!("up [{t}]"),
        format!("down [{t}]"),
        format!("total [{t}]"),
        format!("|v0| [{v}]"),
        format!("|v1| [{v}]"),
        format!("reach [{d}]"),
    );
    for result in model {
        let _ = writeln!(
            table,
            "{:>5} {:>5} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
            result.number,
            if result.is_full { "yes" } else { "no" },
            result.duration1.value(),
            result.duration2.value(),
            result.duration.value(),
            result.start_velocity.magnitude().value(),
            result.end_velocity.magnitude().value(),
            result.reach.magnitude().value(),
        );
    }
    if model.is_empty() {
        table.push_str("(no cycles)\n");
    }
    table
}

/// Print the predicted cycle sequence.
pub fn print_model_table(model: &[CycleResult], units: &UnitLabels) {
    print!("{}", format_model_table(model, units));
}

/// Print how the external engine has to be driven.
pub fn print_run_plan(plan: &RunPlan, launch: &EngineLaunch) {
    match plan {
        RunPlan::Collisions(n) => println!("Run until more than {n} wall collisions"),
        RunPlan::Stops(n) => println!("Run until more than {n} stop samples"),
    }
    println!("Engine launch:");
    println!("  Mass:           {}", launch.mass);
    println!(
        "  Velocity:       ({}, {})",
        launch.velocity[0], launch.velocity[1]
    );
    println!("  Impulse:        ({}, {})", launch.impulse[0], launch.impulse[1]);
    println!("  Gravity:        {}", launch.gravity);
    println!("  Friction:       {}", launch.friction);
    println!("  Block size:     {}", launch.block_size);
    println!("  Timestep:       {}", launch.timestep);
    println!("  Stop threshold: {}", launch.stop_threshold);
}

/// Print a summary of an exported report.
pub fn print_report_summary(
    report: &AnalysisReport,
    path: &Path,
    units: &UnitLabels,
    verbose: bool,
) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Cycles compared: {}", report.len());
    println!("Report:          {}", path.display());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    if report.is_empty() {
        println!("No cycle could be compared.");
        return;
    }

    if verbose {
        println!("Model:");
        print_model_table(&report.model, units);
        println!();
    }

    println!("Relative error per cycle:");
    println!(
        "{:>5} {:>12} {:>12} {:>12}",
        "cycle", "duration", "|v0|", "reach"
    );
    for error in &report.errors {
        println!(
            "{:>5} {:>12.4} {:>12.4} {:>12.4}",
            error.number,
            error.duration.rel.value(),
            error.start_velocity.magnitude.rel.value(),
            error.reach.magnitude.rel.value(),
        );
    }
}
