//! Configuration loaded from YAML with schema and semantic validation.
//!
//! Sections: `log`, `output`, `simulation`, `math`, thresholds and gravity,
//! `units`, `input` bounds and an optional `launch`. Nothing here
//! is global: [`AnalysisConfig::settings`] condenses the values the analysis
//! needs into a plain [`AnalysisSettings`], which is handed to
//! [`AnalysisEngine`](crate::analysis::AnalysisEngine) once.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use validator::Validate;

use crate::error::{SlopeError, SlopeResult};
use crate::math::{Precision, Unit};

/// Largest number of decimal places an `f64` can meaningfully keep.
pub const MAX_PRECISION_DIGITS: u32 = 15;

/// Log levels accepted in `log.level`.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Logging configuration.
    #[validate(nested)]
    #[serde(default)]
    pub log: LogConfig,

    /// Output configuration.
    #[validate(nested)]
    #[serde(default)]
    pub output: OutputConfig,

    /// Parameters of the engine run the events come from.
    #[validate(nested)]
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Rounding policy.
    #[validate(nested)]
    #[serde(default)]
    pub math: MathConfig,

    /// Speed below which the block counts as stopped, in true units.
    /// Also terminates the model sequence.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_measure_precision")]
    pub measure_precision: f64,

    /// Gravitational acceleration (m/s²).
    #[validate(range(min = 0.0))]
    #[serde(default = "default_g")]
    pub g: f64,

    /// Hard cap on the length of the model sequence.
    #[validate(range(min = 1))]
    #[serde(default = "default_max_model_cycles")]
    pub max_model_cycles: usize,

    /// Display labels for units.
    #[serde(default)]
    pub units: UnitLabels,

    /// Exclusive bounds launch conditions are checked against.
    #[serde(default)]
    pub input: InputBounds,

    /// Launch conditions, when not given on the command line.
    #[validate(nested)]
    #[serde(default)]
    pub launch: Option<LaunchConfig>,
}

const fn default_measure_precision() -> f64 {
    0.1
}

const fn default_g() -> f64 {
    9.81
}

const fn default_max_model_cycles() -> usize {
    1000
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            log: LogConfig::default(),
            output: OutputConfig::default(),
            simulation: SimulationConfig::default(),
            math: MathConfig::default(),
            measure_precision: default_measure_precision(),
            g: default_g(),
            max_model_cycles: default_max_model_cycles(),
            units: UnitLabels::default(),
            input: InputBounds::default(),
            launch: None,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SlopeResult<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading configuration");
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load configuration, writing the defaults to `path` first if the file
    /// does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns error if the default file cannot be written or the existing
    /// file fails to load.
    pub fn load_or_generate<P: AsRef<Path>>(path: P) -> SlopeResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(path = %path.display(), "configuration file missing, generating defaults");
            Self::default().write(path)?;
        }
        Self::load(path)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SlopeResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;

        config.validate()?;
        config.validate_semantic()?;

        debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> SlopeResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write this configuration as YAML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> SlopeResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_yaml()?)?;
        debug!(path = %path.display(), "configuration written");
        Ok(())
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate semantic constraints beyond schema.
    fn validate_semantic(&self) -> SlopeResult<()> {
        if self.simulation.scale <= 0.0 {
            return Err(SlopeError::config(format!(
                "simulation.scale must be positive, got {}",
                self.simulation.scale
            )));
        }
        if self.g <= 0.0 {
            return Err(SlopeError::config(format!(
                "g must be positive, got {}",
                self.g
            )));
        }
        if self.measure_precision <= 0.0 {
            return Err(SlopeError::config(
                "measure_precision must be positive, the model sequence would never terminate",
            ));
        }
        if self.math.precision > MAX_PRECISION_DIGITS {
            return Err(SlopeError::config(format!(
                "math.precision must not exceed {MAX_PRECISION_DIGITS} digits, got {}",
                self.math.precision
            )));
        }
        if let Some(epsilon) = self.math.collapse_epsilon {
            if !(epsilon >= 0.0 && epsilon.is_finite()) {
                return Err(SlopeError::config(format!(
                    "math.collapse_epsilon must be a non-negative number, got {epsilon}"
                )));
            }
        }
        for (field, bound) in self.input.fields() {
            if let (Some(min), Some(max)) = (bound.min, bound.max) {
                if min >= max {
                    return Err(SlopeError::config(format!(
                        "input.{field}: min ({min}) must be below max ({max})"
                    )));
                }
            }
        }
        if !LOG_LEVELS.contains(&self.log.level.to_lowercase().as_str()) {
            return Err(SlopeError::config(format!(
                "log.level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.log.level
            )));
        }
        Ok(())
    }

    /// Rounding policy described by the `math` section.
    #[must_use]
    pub fn precision(&self) -> Precision {
        let precision = Precision::new(self.math.precision);
        match self.math.collapse_epsilon {
            Some(epsilon) => precision.with_collapse(epsilon),
            None => precision,
        }
    }

    /// Values the analysis core depends on.
    #[must_use]
    pub fn settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            precision: self.precision(),
            length_scale: self.simulation.scale,
            stop_threshold: self.measure_precision,
            g: self.g,
            frame_height: f64::from(self.simulation.resolution[1]),
            max_model_cycles: self.max_model_cycles,
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    precision: Option<u32>,
    collapse_epsilon: Option<f64>,
    scale: Option<f64>,
    measure_precision: Option<f64>,
    g: Option<f64>,
    max_model_cycles: Option<usize>,
    launch: Option<LaunchConfig>,
}

impl AnalysisConfigBuilder {
    /// Set the number of decimal places kept.
    #[must_use]
    pub const fn precision(mut self, digits: u32) -> Self {
        self.precision = Some(digits);
        self
    }

    /// Enable the near-zero collapse.
    #[must_use]
    pub const fn collapse_epsilon(mut self, epsilon: f64) -> Self {
        self.collapse_epsilon = Some(epsilon);
        self
    }

    /// Set the length scale of the engine run.
    #[must_use]
    pub const fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Set the stop-velocity threshold.
    #[must_use]
    pub const fn measure_precision(mut self, threshold: f64) -> Self {
        self.measure_precision = Some(threshold);
        self
    }

    /// Set gravitational acceleration.
    #[must_use]
    pub const fn g(mut self, g: f64) -> Self {
        self.g = Some(g);
        self
    }

    /// Set the model sequence cap.
    #[must_use]
    pub const fn max_model_cycles(mut self, cycles: usize) -> Self {
        self.max_model_cycles = Some(cycles);
        self
    }

    /// Set launch conditions.
    #[must_use]
    pub const fn launch(mut self, launch: LaunchConfig) -> Self {
        self.launch = Some(launch);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AnalysisConfig {
        let mut config = AnalysisConfig::default();

        if let Some(digits) = self.precision {
            config.math.precision = digits;
        }
        if self.collapse_epsilon.is_some() {
            config.math.collapse_epsilon = self.collapse_epsilon;
        }
        if let Some(scale) = self.scale {
            config.simulation.scale = scale;
        }
        if let Some(threshold) = self.measure_precision {
            config.measure_precision = threshold;
        }
        if let Some(g) = self.g {
            config.g = g;
        }
        if let Some(cycles) = self.max_model_cycles {
            config.max_model_cycles = cycles;
        }
        if self.launch.is_some() {
            config.launch = self.launch;
        }

        config
    }
}

/// Plain values the analysis core is parameterised with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisSettings {
    /// Rounding policy for every quantity.
    pub precision: Precision,
    /// Magnification of the engine run.
    pub length_scale: f64,
    /// Stop / termination speed in true units.
    pub stop_threshold: f64,
    /// Gravitational acceleration.
    pub g: f64,
    /// Screen height, origin of the absolute frame translation.
    pub frame_height: f64,
    /// Model sequence cap.
    pub max_model_cycles: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisConfig::default().settings()
    }
}

/// Where log records go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogTarget {
    /// Standard error.
    #[default]
    Console,
    /// Append to `log.path`.
    File,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogConfig {
    /// Output target.
    #[serde(default)]
    pub target: LogTarget,
    /// Default level, overridden by `RUST_LOG`.
    #[validate(length(min = 1))]
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path for the file target.
    #[serde(default = "default_log_path")]
    pub path: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_path() -> PathBuf {
    PathBuf::from("./slopecycle.log")
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            target: LogTarget::default(),
            level: default_log_level(),
            path: default_log_path(),
        }
    }
}

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One row per cycle.
    #[default]
    Csv,
    /// The whole report as a JSON document.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = SlopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(SlopeError::config(format!(
                "unknown output format '{other}', expected 'csv' or 'json'"
            ))),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OutputConfig {
    /// Report format.
    #[serde(default)]
    pub format: OutputFormat,
    /// Report path.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("./output.csv")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            path: default_output_path(),
        }
    }
}

/// Parameters of the (magnified) engine run.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SimulationConfig {
    /// Screen resolution `[width, height]` in engine units.
    #[serde(default = "default_resolution")]
    pub resolution: [u32; 2],
    /// Length scale applied to the run.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Edge length of the block in engine units.
    #[validate(range(min = 1))]
    #[serde(default = "default_block_size")]
    pub block_size: u32,
    /// Engine steps per second.
    #[validate(range(min = 1))]
    #[serde(default = "default_fps")]
    pub fps: u32,
}

const fn default_resolution() -> [u32; 2] {
    [800, 800]
}

const fn default_scale() -> f64 {
    10.0
}

const fn default_block_size() -> u32 {
    40
}

const fn default_fps() -> u32 {
    60
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            scale: default_scale(),
            block_size: default_block_size(),
            fps: default_fps(),
        }
    }
}

/// Rounding configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MathConfig {
    /// Decimal places kept.
    #[serde(default = "default_precision")]
    pub precision: u32,
    /// When set, magnitudes at or below this value collapse to zero.
    #[serde(default)]
    pub collapse_epsilon: Option<f64>,
}

const fn default_precision() -> u32 {
    10
}

impl Default for MathConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            collapse_epsilon: None,
        }
    }
}

/// Unit labels used when printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitLabels {
    /// Distance.
    pub distance: String,
    /// Time.
    pub time: String,
    /// Velocity.
    pub velocity: String,
    /// Tilt.
    pub tilt: String,
    /// Mass.
    pub mass: String,
    /// Acceleration.
    pub acceleration: String,
}

impl Default for UnitLabels {
    fn default() -> Self {
        Self {
            distance: Unit::Distance.symbol().to_string(),
            time: Unit::Time.symbol().to_string(),
            velocity: Unit::Velocity.symbol().to_string(),
            tilt: Unit::Tilt.symbol().to_string(),
            mass: Unit::Mass.symbol().to_string(),
            acceleration: Unit::Acceleration.symbol().to_string(),
        }
    }
}

impl UnitLabels {
    /// Label for a unit tag.
    #[must_use]
    pub fn label(&self, unit: Unit) -> &str {
        match unit {
            Unit::Distance => &self.distance,
            Unit::Time => &self.time,
            Unit::Velocity => &self.velocity,
            Unit::Tilt => &self.tilt,
            Unit::Mass => &self.mass,
            Unit::Acceleration => &self.acceleration,
        }
    }
}

/// Open interval a launch value must lie in. A missing side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    /// Value must be strictly greater.
    #[serde(default)]
    pub min: Option<f64>,
    /// Value must be strictly smaller.
    #[serde(default)]
    pub max: Option<f64>,
}

impl Bound {
    /// Create a bound.
    #[must_use]
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Check `value` against the bound.
    ///
    /// # Errors
    ///
    /// Returns [`SlopeError::InvalidLaunch`] naming `field` when the value
    /// is outside the interval or NaN.
    pub fn check(&self, field: &'static str, value: f64) -> SlopeResult<()> {
        if value.is_nan() {
            return Err(SlopeError::invalid_launch(field, "value is NaN"));
        }
        if let Some(min) = self.min {
            if value <= min {
                return Err(SlopeError::invalid_launch(
                    field,
                    format!("value too small, min={min} given={value}"),
                ));
            }
        }
        if let Some(max) = self.max {
            if value >= max {
                return Err(SlopeError::invalid_launch(
                    field,
                    format!("value too big, max={max} given={value}"),
                ));
            }
        }
        Ok(())
    }
}

/// Configurable bounds for each launch value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputBounds {
    /// Tilt in radians.
    #[serde(default)]
    pub tilt: Bound,
    /// Mass in kilograms.
    #[serde(default)]
    pub mass: Bound,
    /// Launch speed in m/s.
    #[serde(default)]
    pub initial_speed: Bound,
    /// Friction coefficient.
    #[serde(default)]
    pub friction: Bound,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            tilt: Bound::new(Some(0.0), Some(std::f64::consts::FRAC_PI_2)),
            mass: Bound::new(Some(0.0), None),
            initial_speed: Bound::new(Some(0.0), None),
            friction: Bound::default(),
        }
    }
}

impl InputBounds {
    /// Bounds paired with their field names.
    #[must_use]
    pub const fn fields(&self) -> [(&'static str, Bound); 4] {
        [
            ("tilt", self.tilt),
            ("mass", self.mass),
            ("initial_speed", self.initial_speed),
            ("friction", self.friction),
        ]
    }
}

/// Launch conditions as written in the config file.
///
/// Range checks that need more than a lower bound (tilt below pi/2,
/// strictly positive mass) happen in
/// [`LaunchConditions::from_config`](crate::launch::LaunchConditions::from_config).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LaunchConfig {
    /// Plane tilt in radians.
    #[validate(range(min = 0.0))]
    pub tilt: f64,
    /// Block mass in kilograms.
    #[validate(range(min = 0.0))]
    pub mass: f64,
    /// Launch speed along the slope in m/s.
    #[validate(range(min = 0.0))]
    pub initial_speed: f64,
    /// Coulomb friction coefficient.
    #[validate(range(min = 0.0))]
    pub friction: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_config_defaults() {
        let config = AnalysisConfig::default();

        assert_eq!(config.math.precision, 10);
        assert!(config.math.collapse_epsilon.is_none());
        assert_relative_eq!(config.simulation.scale, 10.0);
        assert_relative_eq!(config.measure_precision, 0.1);
        assert_relative_eq!(config.g, 9.81);
        assert_eq!(config.simulation.resolution, [800, 800]);
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert_eq!(config.log.target, LogTarget::Console);
        assert!(config.launch.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = AnalysisConfig::builder()
            .precision(6)
            .collapse_epsilon(1e-9)
            .scale(20.0)
            .measure_precision(0.05)
            .g(9.8)
            .max_model_cycles(50)
            .build();

        let settings = config.settings();
        assert_eq!(settings.precision.digits, 6);
        assert_eq!(settings.precision.collapse_epsilon, Some(1e-9));
        assert_relative_eq!(settings.length_scale, 20.0);
        assert_relative_eq!(settings.stop_threshold, 0.05);
        assert_relative_eq!(settings.g, 9.8);
        assert_eq!(settings.max_model_cycles, 50);
        assert_relative_eq!(settings.frame_height, 800.0);
    }

    #[test]
    fn test_config_yaml_parse() {
        let yaml = r"
log:
  target: file
  level: debug
simulation:
  resolution: [1024, 600]
  scale: 5
math:
  precision: 8
  collapse_epsilon: 1.0e-9
g: 9.80665
launch:
  tilt: 0.7853981634
  mass: 1
  initial_speed: 20
  friction: 0.3
";
        let config = AnalysisConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.log.target, LogTarget::File);
        assert_eq!(config.simulation.resolution, [1024, 600]);
        assert_relative_eq!(config.settings().frame_height, 600.0);
        assert_eq!(config.precision(), Precision::new(8).with_collapse(1e-9));
        assert_relative_eq!(config.launch.unwrap().friction, 0.3);
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        assert!(AnalysisConfig::from_yaml("gravity: 9.81\n").is_err());
    }

    #[test]
    fn test_config_validation_fails_negative_scale() {
        let yaml = r"
simulation:
  scale: -1.0
";
        let err = AnalysisConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("simulation.scale"));
    }

    #[test]
    fn test_config_validation_fails_zero_fps() {
        let yaml = r"
simulation:
  fps: 0
";
        let err = AnalysisConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, SlopeError::Validation(_)));
    }

    #[test]
    fn test_config_validation_fails_zero_threshold() {
        let err = AnalysisConfig::from_yaml("measure_precision: 0.0\n").unwrap_err();
        assert!(err.to_string().contains("measure_precision"));
    }

    #[test]
    fn test_config_validation_fails_excessive_precision() {
        let yaml = r"
math:
  precision: 40
";
        assert!(AnalysisConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_config_validation_fails_bad_log_level() {
        let yaml = r"
log:
  level: loud
";
        let err = AnalysisConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("log.level"));
    }

    #[test]
    fn test_config_negative_launch_rejected() {
        let yaml = r"
launch:
  tilt: 0.5
  mass: 1
  initial_speed: 3
  friction: -0.1
";
        let err = AnalysisConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, SlopeError::Validation(_)));
    }

    #[test]
    fn test_config_yaml_roundtrip() {
        let config = AnalysisConfig::builder().precision(7).scale(3.0).build();
        let yaml = config.to_yaml().unwrap();
        let parsed = AnalysisConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.settings(), config.settings());
    }

    #[test]
    fn test_load_or_generate_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        assert!(!path.exists());

        let config = AnalysisConfig::load_or_generate(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.settings(), AnalysisSettings::default());

        // Second call reads the existing file.
        std::fs::write(&path, "g: 1.62\n").unwrap();
        let moon = AnalysisConfig::load_or_generate(&path).unwrap();
        assert_relative_eq!(moon.g, 1.62);
    }

    #[test]
    fn test_bound_check_is_exclusive() {
        let bound = Bound::new(Some(0.0), Some(1.0));
        assert!(bound.check("tilt", 0.5).is_ok());
        assert!(bound.check("tilt", 0.0).is_err());
        assert!(bound.check("tilt", 1.0).is_err());
        assert!(bound.check("tilt", f64::NAN).is_err());
        assert!(Bound::default().check("friction", 1e9).is_ok());
    }

    #[test]
    fn test_config_validation_fails_inverted_bounds() {
        let yaml = r"
input:
  mass:
    min: 5.0
    max: 1.0
";
        let err = AnalysisConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("input.mass"));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_unit_labels() {
        let mut labels = UnitLabels::default();
        assert_eq!(labels.label(Unit::Velocity), "m/s");
        labels.distance = "px".to_string();
        assert_eq!(labels.label(Unit::Distance), "px");
    }
}
