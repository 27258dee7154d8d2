//! CLI module for slopecycle.
//!
//! This module contains all CLI logic extracted from main.rs to enable
//! full test coverage. The entry point `run_cli` can be called from main.rs
//! with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, LaunchOverrides};
pub use commands::{analyze, init_config, load_config, resolve_launch, run_cli, show_model};
pub use output::{
    format_model_table, print_help, print_model_table, print_report_summary, print_run_plan,
    print_version, version_string,
};
