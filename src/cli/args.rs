//! CLI argument parsing.
//!
//! This module provides the argument parser for the slopecycle CLI.
//! Extracted to enable comprehensive testing of argument parsing logic.

use std::path::{Path, PathBuf};

use crate::config::{LaunchConfig, OutputFormat};
use crate::error::{SlopeError, SlopeResult};

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Launch values given on the command line. Missing values fall back to
/// the `launch` section of the configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LaunchOverrides {
    /// `--tilt <rad>`
    pub tilt: Option<f64>,
    /// `--mass <kg>`
    pub mass: Option<f64>,
    /// `--speed <m/s>`
    pub initial_speed: Option<f64>,
    /// `--friction <coefficient>`
    pub friction: Option<f64>,
}

impl LaunchOverrides {
    /// Whether no value was given.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tilt.is_none()
            && self.mass.is_none()
            && self.initial_speed.is_none()
            && self.friction.is_none()
    }

    /// Merge with the configured launch section.
    ///
    /// # Errors
    ///
    /// Returns [`SlopeError::InvalidLaunch`] naming the first value that is
    /// given neither on the command line nor in the configuration.
    pub fn resolve(&self, configured: Option<&LaunchConfig>) -> SlopeResult<LaunchConfig> {
        let pick = |field: &'static str, flag: &str, given: Option<f64>, from_config: Option<f64>| {
            given.or(from_config).ok_or_else(|| {
                SlopeError::invalid_launch(
                    field,
                    format!("missing, pass --{flag} or set launch.{field} in the configuration"),
                )
            })
        };

        Ok(LaunchConfig {
            tilt: pick("tilt", "tilt", self.tilt, configured.map(|c| c.tilt))?,
            mass: pick("mass", "mass", self.mass, configured.map(|c| c.mass))?,
            initial_speed: pick(
                "initial_speed",
                "speed",
                self.initial_speed,
                configured.map(|c| c.initial_speed),
            )?,
            friction: pick(
                "friction",
                "friction",
                self.friction,
                configured.map(|c| c.friction),
            )?,
        })
    }
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Analyse a recorded engine run
    Analyze {
        /// Path to the event log (JSON or YAML).
        events_path: PathBuf,
        /// Optional configuration file.
        config_path: Option<PathBuf>,
        /// Output path override.
        output_path: Option<PathBuf>,
        /// Output format override.
        format: Option<OutputFormat>,
        /// Launch value overrides.
        launch: LaunchOverrides,
        /// Enable verbose output.
        verbose: bool,
    },
    /// Print the predicted cycle sequence
    Model {
        /// Optional configuration file.
        config_path: Option<PathBuf>,
        /// Launch value overrides.
        launch: LaunchOverrides,
        /// Enable verbose output.
        verbose: bool,
    },
    /// Write a default configuration file
    InitConfig {
        /// Destination path.
        path: PathBuf,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Command {
    /// Verbosity of commands that run the analysis; `None` for the others.
    #[must_use]
    pub const fn verbose(&self) -> Option<bool> {
        match self {
            Self::Analyze { verbose, .. } | Self::Model { verbose, .. } => Some(*verbose),
            _ => None,
        }
    }

    /// Configuration file given on the command line.
    #[must_use]
    pub fn config_path(&self) -> Option<&Path> {
        match self {
            Self::Analyze { config_path, .. } | Self::Model { config_path, .. } => {
                config_path.as_deref()
            }
            _ => None,
        }
    }
}

/// Options shared by `analyze` and `model`.
#[derive(Debug, Default)]
struct Options {
    config_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    format: Option<OutputFormat>,
    launch: LaunchOverrides,
    verbose: bool,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// This method is testable as it accepts any iterator of strings,
    /// not just `std::env::args()`.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// Internal parsing from a vector of strings.
    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "analyze" | "analyse" => Self::parse_analyze_command(args),
            "model" => Self::parse_model_command(args),
            "init-config" => Self::parse_init_config_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    /// Parse the 'analyze' command arguments.
    fn parse_analyze_command(args: &[String]) -> Command {
        if args.len() < 3 || args[2].starts_with('-') {
            eprintln!("Error: 'analyze' command requires an event log path");
            return Command::Help;
        }

        match Self::parse_options(&args[3..]) {
            Some(options) => Command::Analyze {
                events_path: PathBuf::from(&args[2]),
                config_path: options.config_path,
                output_path: options.output_path,
                format: options.format,
                launch: options.launch,
                verbose: options.verbose,
            },
            None => Command::Help,
        }
    }

    /// Parse the 'model' command arguments.
    fn parse_model_command(args: &[String]) -> Command {
        match Self::parse_options(&args[2..]) {
            Some(options) => Command::Model {
                config_path: options.config_path,
                launch: options.launch,
                verbose: options.verbose,
            },
            None => Command::Help,
        }
    }

    /// Parse the 'init-config' command arguments.
    fn parse_init_config_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'init-config' command requires a destination path");
            return Command::Help;
        }

        Command::InitConfig {
            path: PathBuf::from(&args[2]),
        }
    }

    /// Parse trailing options. Returns `None` after reporting a malformed
    /// value.
    fn parse_options(args: &[String]) -> Option<Options> {
        let mut options = Options::default();

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            let value = args.get(i + 1).map(String::as_str);
            match flag {
                "-v" | "--verbose" => {
                    options.verbose = true;
                    i += 1;
                    continue;
                }
                "-c" | "--config" => options.config_path = value.map(PathBuf::from),
                "-o" | "--output" => options.output_path = value.map(PathBuf::from),
                "-f" | "--format" => match value.map(str::parse::<OutputFormat>) {
                    Some(Ok(format)) => options.format = Some(format),
                    Some(Err(e)) => {
                        eprintln!("Error: {e}");
                        return None;
                    }
                    None => {}
                },
                "--tilt" => options.launch.tilt = Some(Self::parse_number(flag, value)?),
                "--mass" => options.launch.mass = Some(Self::parse_number(flag, value)?),
                "--speed" => {
                    options.launch.initial_speed = Some(Self::parse_number(flag, value)?);
                }
                "--friction" => options.launch.friction = Some(Self::parse_number(flag, value)?),
                unknown => {
                    eprintln!("Warning: ignoring unknown argument '{unknown}'");
                    i += 1;
                    continue;
                }
            }
            if value.is_none() {
                eprintln!("Error: '{flag}' requires a value");
                return None;
            }
            i += 2;
        }

        Some(options)
    }

    fn parse_number(flag: &str, value: Option<&str>) -> Option<f64> {
        let Some(raw) = value else {
            eprintln!("Error: '{flag}' requires a value");
            return None;
        };
        match raw.parse::<f64>() {
            Ok(number) => Some(number),
            Err(_) => {
                eprintln!("Error: '{flag}' expects a number, got '{raw}'");
                None
            }
        }
    }
}
