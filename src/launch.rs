//! Launch conditions of a run.
//!
//! The tilt, mass and launch speed are held as `uom` quantities so the
//! engine-facing conversions can't mix dimensions. Mass is carried along
//! for the engine run only: nothing in the closed-form model reads it.

use serde::Serialize;
use tracing::debug;
use uom::si::angle::radian;
use uom::si::f64::{Angle, Mass, Velocity};
use uom::si::mass::kilogram;
use uom::si::velocity::meter_per_second;

use crate::analysis::{self, CycleResult};
use crate::config::{AnalysisConfig, InputBounds, LaunchConfig};
use crate::error::{SlopeError, SlopeResult};
use crate::events::StopDetector;
use crate::math::{Precision, Unit, Vector};

/// Stop samples the engine collects before ending a run whose model
/// predicts the block sticks.
pub const STOP_SAMPLE_BUDGET: usize = 10;

/// Validated launch tuple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchConditions {
    tilt: Angle,
    mass: Mass,
    initial_speed: Velocity,
    friction: f64,
}

impl LaunchConditions {
    /// Create launch conditions from SI values.
    ///
    /// # Errors
    ///
    /// Returns [`SlopeError::InvalidLaunch`] unless tilt is in `(0, pi/2)`,
    /// mass and speed are positive and friction is non-negative.
    pub fn new(tilt: f64, mass: f64, initial_speed: f64, friction: f64) -> SlopeResult<Self> {
        if !(tilt > 0.0 && tilt < std::f64::consts::FRAC_PI_2) {
            return Err(SlopeError::invalid_launch(
                "tilt",
                format!("must be in (0, pi/2) rad, got {tilt}"),
            ));
        }
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(SlopeError::invalid_launch(
                "mass",
                format!("must be positive, got {mass}"),
            ));
        }
        if !(initial_speed > 0.0 && initial_speed.is_finite()) {
            return Err(SlopeError::invalid_launch(
                "initial_speed",
                format!("must be positive, got {initial_speed}"),
            ));
        }
        if !(friction >= 0.0 && friction.is_finite()) {
            return Err(SlopeError::invalid_launch(
                "friction",
                format!("must be non-negative, got {friction}"),
            ));
        }

        Ok(Self {
            tilt: Angle::new::<radian>(tilt),
            mass: Mass::new::<kilogram>(mass),
            initial_speed: Velocity::new::<meter_per_second>(initial_speed),
            friction,
        })
    }

    /// Build from the config `launch` section, also applying the configured
    /// input bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SlopeError::InvalidLaunch`] if any value is out of range.
    pub fn from_config(launch: &LaunchConfig, bounds: &InputBounds) -> SlopeResult<Self> {
        let conditions = Self::new(
            launch.tilt,
            launch.mass,
            launch.initial_speed,
            launch.friction,
        )?;
        conditions.check_bounds(bounds)?;
        Ok(conditions)
    }

    /// Check against configurable exclusive bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SlopeError::InvalidLaunch`] for the first value outside
    /// its bound.
    pub fn check_bounds(&self, bounds: &InputBounds) -> SlopeResult<()> {
        bounds.tilt.check("tilt", self.tilt_rad())?;
        bounds.mass.check("mass", self.mass_kg())?;
        bounds
            .initial_speed
            .check("initial_speed", self.initial_speed_mps())?;
        bounds.friction.check("friction", self.friction)
    }

    /// Plane tilt.
    #[must_use]
    pub const fn tilt(&self) -> Angle {
        self.tilt
    }

    /// Plane tilt in radians.
    #[must_use]
    pub fn tilt_rad(&self) -> f64 {
        self.tilt.get::<radian>()
    }

    /// Block mass.
    #[must_use]
    pub const fn mass(&self) -> Mass {
        self.mass
    }

    /// Block mass in kilograms.
    #[must_use]
    pub fn mass_kg(&self) -> f64 {
        self.mass.get::<kilogram>()
    }

    /// Launch speed along the slope.
    #[must_use]
    pub const fn initial_speed(&self) -> Velocity {
        self.initial_speed
    }

    /// Launch speed in m/s.
    #[must_use]
    pub fn initial_speed_mps(&self) -> f64 {
        self.initial_speed.get::<meter_per_second>()
    }

    /// Coulomb friction coefficient.
    #[must_use]
    pub const fn friction(&self) -> f64 {
        self.friction
    }

    /// Whether the block slides back down after stopping. Same predicate
    /// the model uses to classify a cycle as full.
    #[must_use]
    pub fn slides_back(&self) -> bool {
        analysis::slides_back(self.tilt_rad(), self.friction)
    }

    /// Launch velocity resolved along the slope, `speed * (cos, sin)`.
    #[must_use]
    pub fn initial_velocity(&self, precision: Precision) -> Vector {
        let (sin, cos) = self.tilt_rad().sin_cos();
        let speed = self.initial_speed_mps();
        Vector::from_f64(speed * cos, speed * sin, Some(Unit::Velocity), precision)
    }

    /// Launch parameters in engine units for a magnified run, including the
    /// stop threshold the analysis will apply to the recorded frames.
    #[must_use]
    pub fn engine_launch(&self, config: &AnalysisConfig) -> EngineLaunch {
        let simulation = &config.simulation;
        let scale = simulation.scale;
        let (sin, cos) = self.tilt_rad().sin_cos();
        let speed = self.initial_speed_mps() * scale;
        let mass = self.mass_kg() * scale;
        // engine frame: y grows downwards
        let velocity = [speed * cos, -(speed * sin)];

        let launch = EngineLaunch {
            mass,
            velocity,
            impulse: [velocity[0] * mass, velocity[1] * mass],
            gravity: config.g * scale,
            friction: self.friction,
            block_size: f64::from(simulation.block_size),
            timestep: 1.0 / f64::from(simulation.fps),
            stop_threshold: StopDetector::from_settings(&config.settings()).threshold(),
        };
        debug!(?launch, "engine launch prepared");
        launch
    }
}

/// Launch parameters handed to the physics engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EngineLaunch {
    /// Magnified mass.
    pub mass: f64,
    /// Magnified launch velocity, engine frame.
    pub velocity: [f64; 2],
    /// Impulse applied to the block at launch.
    pub impulse: [f64; 2],
    /// Magnified gravitational acceleration (acts along +y in the engine).
    pub gravity: f64,
    /// Friction coefficient of the block.
    pub friction: f64,
    /// Block edge length.
    pub block_size: f64,
    /// Engine step in seconds.
    pub timestep: f64,
    /// Speed per axis below which a frame counts as a stop, engine units.
    pub stop_threshold: f64,
}

/// How long the external engine has to run to produce enough events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "until", content = "count")]
pub enum RunPlan {
    /// Run until more wall collisions than this have been observed.
    Collisions(usize),
    /// Run until more stop samples than this have been observed.
    Stops(usize),
}

impl RunPlan {
    /// Plan a run from the predicted cycle sequence.
    #[must_use]
    pub fn from_model(model: &[CycleResult]) -> Self {
        match model.first() {
            Some(first) if first.is_full => Self::Collisions(model.len()),
            _ => Self::Stops(STOP_SAMPLE_BUDGET),
        }
    }

    /// Whether a run with the given event counts can stop.
    #[must_use]
    pub const fn is_complete(&self, collisions: usize, stops: usize) -> bool {
        match *self {
            Self::Collisions(expected) => collisions > expected,
            Self::Stops(budget) => stops > budget,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnalysisConfig, Bound};
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6};

    #[test]
    fn test_new_accepts_valid_tuple() {
        let launch = LaunchConditions::new(FRAC_PI_4, 1.0, 20.0, 0.3).unwrap();
        assert_relative_eq!(launch.tilt_rad(), FRAC_PI_4);
        assert_relative_eq!(launch.mass_kg(), 1.0);
        assert_relative_eq!(launch.initial_speed_mps(), 20.0);
        assert_relative_eq!(launch.friction(), 0.3);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        let cases = [
            (0.0, 1.0, 1.0, 0.1, "tilt"),
            (FRAC_PI_2, 1.0, 1.0, 0.1, "tilt"),
            (f64::NAN, 1.0, 1.0, 0.1, "tilt"),
            (0.5, 0.0, 1.0, 0.1, "mass"),
            (0.5, 1.0, -2.0, 0.1, "initial_speed"),
            (0.5, 1.0, 1.0, -0.1, "friction"),
        ];
        for (tilt, mass, speed, friction, expected) in cases {
            match LaunchConditions::new(tilt, mass, speed, friction) {
                Err(SlopeError::InvalidLaunch { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected invalid {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_zero_friction_allowed() {
        assert!(LaunchConditions::new(0.3, 1.0, 5.0, 0.0).is_ok());
    }

    #[test]
    fn test_from_config_applies_bounds() {
        let cfg = LaunchConfig {
            tilt: 0.5,
            mass: 50.0,
            initial_speed: 5.0,
            friction: 0.2,
        };
        let mut bounds = InputBounds::default();
        assert!(LaunchConditions::from_config(&cfg, &bounds).is_ok());

        bounds.mass = Bound::new(Some(0.0), Some(10.0));
        let err = LaunchConditions::from_config(&cfg, &bounds).unwrap_err();
        assert!(err.to_string().contains("mass"));
    }

    #[test]
    fn test_initial_velocity_resolved_along_slope() {
        let launch = LaunchConditions::new(FRAC_PI_6, 2.0, 10.0, 0.1).unwrap();
        let v = launch.initial_velocity(Precision::default());
        assert_relative_eq!(v.x().value(), 10.0 * FRAC_PI_6.cos(), epsilon = 1e-9);
        assert_relative_eq!(v.y().value(), 5.0, epsilon = 1e-9);
        assert_relative_eq!(v.magnitude().value(), 10.0, epsilon = 1e-9);
        assert_eq!(v.unit(), Some(Unit::Velocity));
    }

    #[test]
    fn test_slides_back_matches_critical_angle() {
        assert!(LaunchConditions::new(FRAC_PI_4, 1.0, 1.0, 0.3)
            .unwrap()
            .slides_back());
        assert!(!LaunchConditions::new(FRAC_PI_4, 1.0, 1.0, 1.5)
            .unwrap()
            .slides_back());
    }

    #[test]
    fn test_engine_launch_scaled() {
        let config = AnalysisConfig::default();
        let launch = LaunchConditions::new(FRAC_PI_6, 2.0, 10.0, 0.1).unwrap();
        let engine = launch.engine_launch(&config);

        assert_relative_eq!(engine.mass, 20.0);
        assert_relative_eq!(engine.velocity[0], 100.0 * FRAC_PI_6.cos(), epsilon = 1e-9);
        assert_relative_eq!(engine.velocity[1], -50.0, epsilon = 1e-9);
        assert_relative_eq!(engine.impulse[1], -1000.0, epsilon = 1e-9);
        assert_relative_eq!(engine.gravity, 98.1, epsilon = 1e-9);
        assert_relative_eq!(engine.timestep, 1.0 / 60.0);
        assert_relative_eq!(engine.stop_threshold, 1.0);
    }

    #[test]
    fn test_engine_launch_stop_threshold_follows_config() {
        let launch = LaunchConditions::new(FRAC_PI_6, 2.0, 10.0, 0.1).unwrap();
        let mut config = AnalysisConfig::default();
        config.measure_precision = 0.05;
        config.simulation.scale = 20.0;

        let engine = launch.engine_launch(&config);
        let detector = StopDetector::from_settings(&config.settings());
        assert_relative_eq!(engine.stop_threshold, 1.0);
        assert_relative_eq!(engine.stop_threshold, detector.threshold());
        assert_relative_eq!(engine.gravity, config.g * 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_slides_back_at_exact_critical_friction() {
        for tilt in [6.283185307179586e-5, 0.3, FRAC_PI_4, 1.4] {
            let launch = LaunchConditions::new(tilt, 1.0, 1.0, tilt.tan()).unwrap();
            assert!(!launch.slides_back(), "tilt {tilt}");
        }
    }

    #[test]
    fn test_run_plan_completion() {
        let collisions = RunPlan::Collisions(3);
        assert!(!collisions.is_complete(3, 100));
        assert!(collisions.is_complete(4, 0));

        let stops = RunPlan::Stops(STOP_SAMPLE_BUDGET);
        assert!(!stops.is_complete(100, STOP_SAMPLE_BUDGET));
        assert!(stops.is_complete(0, STOP_SAMPLE_BUDGET + 1));
    }

    #[test]
    fn test_run_plan_from_empty_model() {
        assert_eq!(RunPlan::from_model(&[]), RunPlan::Stops(STOP_SAMPLE_BUDGET));
    }
}
