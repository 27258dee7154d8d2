//! Per-cycle summaries, measured and predicted.
//!
//! Both tracks produce the same [`CycleResult`] shape: measured results
//! come from a segmented [`Cycle`], model results from the closed-form
//! kinematics of a block on a slope with Coulomb friction. Mass cancels
//! out of every formula and is not an input here.
//!
//! For a launch speed `v0` on a plane tilted by `a` with friction `f`:
//!
//! ```text
//! up   = sin(a) + f cos(a)          down = sin(a) - f cos(a)
//! t1   = v0 / (g up)                v1   = v0 sqrt(down / up)
//! t2   = v1 / (g down)              s    = v0² / (2 g up)
//! ```
//!
//! The block slides back only while `friction < tan(tilt)` (see
//! [`slides_back`]); otherwise it sticks at the turning point and the cycle
//! is not full.

use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

use super::cycle::{Cycle, FIRST_CYCLE_NUMBER};
use crate::math::{Quantity, Unit, Vector};

/// Statistical summary of one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CycleResult {
    /// Cycle number.
    pub number: usize,
    /// Whether the block returned to the wall.
    pub is_full: bool,
    /// Time from the wall to the turning point.
    pub duration1: Quantity,
    /// Time from the turning point back to the wall, NaN if not full.
    pub duration2: Quantity,
    /// `duration1 + duration2` if full, else `duration1`.
    pub duration: Quantity,
    /// Launch velocity, component-wise non-negative.
    pub start_velocity: Vector,
    /// Return velocity, signed.
    pub end_velocity: Vector,
    /// Displacement from the wall to the turning point.
    pub reach: Vector,
}

impl CycleResult {
    /// Assemble a result, deriving `duration` and folding the start
    /// velocity into the positive quadrant.
    #[must_use]
    pub fn new(
        number: usize,
        is_full: bool,
        duration1: Quantity,
        duration2: Quantity,
        start_velocity: Vector,
        end_velocity: Vector,
        reach: Vector,
    ) -> Self {
        let duration = if is_full {
            duration1 + duration2
        } else {
            duration1
        };
        Self {
            number,
            is_full,
            duration1,
            duration2,
            duration,
            start_velocity: start_velocity.abs(),
            end_velocity,
            reach,
        }
    }
}

impl fmt::Display for CycleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CycleResult(number={} is_full={} duration1={} duration2={} duration={} \
             start_velocity={} end_velocity={} reach={})",
            self.number,
            self.is_full,
            self.duration1,
            self.duration2,
            self.duration,
            self.start_velocity,
            self.end_velocity,
            self.reach
        )
    }
}

/// Summarise a measured cycle in true units.
///
/// Velocities and distances of the engine run are magnified by
/// `length_scale`; they are divided back here. Times are not scaled.
#[must_use]
pub fn derive_measured(cycle: &Cycle, length_scale: f64) -> CycleResult {
    let duration1 = cycle.middle.time() - cycle.start.time();
    let duration2 = if cycle.is_full {
        cycle.end.time() - cycle.middle.time()
    } else {
        Quantity::nan()
    };

    let start_velocity = cycle.start.velocity().abs() / length_scale;
    let end_velocity = cycle.end.velocity() / length_scale;
    let reach = (cycle.start.position() - cycle.middle.position()).abs() / length_scale;

    let result = CycleResult::new(
        cycle.number,
        cycle.is_full,
        duration1,
        duration2,
        start_velocity,
        end_velocity,
        reach,
    );
    debug!(%result, "derived measured result");
    result
}

/// Summarise a measured cycle sequence.
#[must_use]
pub fn derive_measured_track(cycles: &[Cycle], length_scale: f64) -> Vec<CycleResult> {
    let results: Vec<CycleResult> = cycles
        .iter()
        .map(|cycle| derive_measured(cycle, length_scale))
        .collect();
    info!(results = results.len(), "derived measured results");
    results
}

/// Whether a block stopped on the slope slides back down.
///
/// Decided on `friction < tan(tilt)` directly: at `friction == tan(tilt)`
/// the difference `sin - friction * cos` can round to a tiny positive value.
#[must_use]
pub fn slides_back(tilt: f64, friction: f64) -> bool {
    friction < tilt.tan()
}

/// Predict one cycle from its launch velocity.
///
/// The rounding policy of `start_velocity` is used for every derived value.
#[must_use]
pub fn model_cycle(
    number: usize,
    start_velocity: Vector,
    tilt: f64,
    friction: f64,
    g: f64,
) -> CycleResult {
    let precision = start_velocity.x().precision();
    let (sin, cos) = tilt.sin_cos();
    let up = sin + friction * cos;
    let down = sin - friction * cos;
    let is_full = slides_back(tilt, friction);

    let v0 = start_velocity.magnitude().value();
    let duration1 = precision.quantity(v0 / (g * up), Some(Unit::Time));
    let reach_length = v0 * v0 / (2.0 * g * up);
    let reach = Vector::from_f64(
        cos * reach_length,
        sin * reach_length,
        Some(Unit::Distance),
        precision,
    );

    let (end_velocity, duration2) = if is_full {
        let v1 = v0 * (down / up).max(0.0).sqrt();
        let end_velocity = Vector::from_f64(-cos * v1, -sin * v1, Some(Unit::Velocity), precision);
        let duration2 = precision.quantity(
            end_velocity.magnitude().value() / (g * down),
            Some(Unit::Time),
        );
        (end_velocity, duration2)
    } else {
        (
            Vector::zero(Some(Unit::Velocity), precision),
            Quantity::nan(),
        )
    };

    CycleResult::new(
        number,
        is_full,
        duration1,
        duration2,
        start_velocity,
        end_velocity,
        reach,
    )
}

/// Predict the cycle sequence of a run.
///
/// Each cycle is launched with the reversed return velocity of the one
/// before. Generation stops after a cycle that is not full, once a return
/// speed is no longer above `threshold`, or when `max_cycles` results
/// exist. The cap only matters without friction, where no speed is lost.
#[must_use]
pub fn model_sequence(
    initial_velocity: Vector,
    tilt: f64,
    friction: f64,
    g: f64,
    threshold: f64,
    max_cycles: usize,
) -> Vec<CycleResult> {
    let mut results = Vec::new();
    let mut start_velocity = initial_velocity;

    loop {
        let number = FIRST_CYCLE_NUMBER + results.len();
        let result = model_cycle(number, start_velocity, tilt, friction, g);
        debug!(%result, "calculated model result");
        results.push(result);

        let still_moving = result.end_velocity.magnitude() > threshold;
        if !result.is_full || !still_moving {
            break;
        }
        if results.len() >= max_cycles {
            warn!(
                max_cycles,
                end_speed = result.end_velocity.magnitude().value(),
                "model sequence truncated before converging"
            );
            break;
        }
        start_velocity = -result.end_velocity;
    }

    info!(
        results = results.len(),
        is_full = results.first().is_some_and(|r| r.is_full),
        "calculated model"
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::sample::Sample;
    use crate::math::Precision;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    const G: f64 = 9.81;

    fn launch(speed: f64, tilt: f64) -> Vector {
        Vector::from_f64(
            speed * tilt.cos(),
            speed * tilt.sin(),
            Some(Unit::Velocity),
            Precision::default(),
        )
    }

    fn sample(time: f64, position: [f64; 2], velocity: [f64; 2]) -> Sample {
        let p = Precision::default();
        Sample::new(
            p.quantity(time, Some(Unit::Time)),
            Vector::from_f64(position[0], position[1], Some(Unit::Distance), p),
            Vector::from_f64(velocity[0], velocity[1], Some(Unit::Velocity), p),
        )
    }

    fn cycle(is_full: bool) -> Cycle {
        Cycle {
            number: 1,
            start: sample(1.0, [100.0, 50.0], [-30.0, 40.0]),
            middle: sample(2.5, [130.0, 90.0], [0.1, 0.0]),
            end: sample(4.0, [100.0, 50.0], [-20.0, -25.0]),
            is_full,
        }
    }

    #[test]
    fn test_derive_measured_full() {
        let result = derive_measured(&cycle(true), 10.0);

        assert_eq!(result.number, 1);
        assert!(result.is_full);
        assert_eq!(result.duration1, 1.5);
        assert_eq!(result.duration2, 1.5);
        assert_eq!(result.duration, 3.0);
        assert_eq!(result.start_velocity.x(), 3.0);
        assert_eq!(result.start_velocity.y(), 4.0);
        assert_eq!(result.end_velocity.x(), -2.0);
        assert_eq!(result.end_velocity.y(), -2.5);
        assert_eq!(result.reach.x(), 3.0);
        assert_eq!(result.reach.y(), 4.0);
        assert_eq!(result.reach.magnitude(), 5.0);
    }

    #[test]
    fn test_derive_measured_not_full() {
        let result = derive_measured(&cycle(false), 10.0);
        assert!(!result.is_full);
        assert!(result.duration2.is_nan());
        assert_eq!(result.duration, result.duration1);
    }

    #[test]
    fn test_model_cycle_full() {
        let v0 = 20.0;
        let result = model_cycle(1, launch(v0, FRAC_PI_4), FRAC_PI_4, 0.3, G);
        let (sin, cos) = FRAC_PI_4.sin_cos();
        let up = sin + 0.3 * cos;
        let down = sin - 0.3 * cos;

        assert!(result.is_full);
        assert_relative_eq!(result.duration1.value(), v0 / (G * up), epsilon = 1e-9);
        let v1 = v0 * (down / up).sqrt();
        assert_relative_eq!(result.end_velocity.magnitude().value(), v1, epsilon = 1e-9);
        assert!(result.end_velocity.x() < 0.0);
        assert!(result.end_velocity.y() < 0.0);
        assert_relative_eq!(result.duration2.value(), v1 / (G * down), epsilon = 1e-9);
        assert_relative_eq!(
            result.duration.value(),
            result.duration1.value() + result.duration2.value(),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            result.reach.magnitude().value(),
            v0 * v0 / (2.0 * G * up),
            epsilon = 1e-8
        );
        assert_eq!(result.duration1.unit(), Some(Unit::Time));
        assert_eq!(result.reach.unit(), Some(Unit::Distance));
    }

    #[test]
    fn test_model_cycle_critical_angle() {
        let result = model_cycle(1, launch(20.0, FRAC_PI_4), FRAC_PI_4, 1.5, G);
        assert!(!result.is_full);
        assert_eq!(result.end_velocity.magnitude(), 0.0);
        assert!(result.duration2.is_nan());
        assert_eq!(result.duration, result.duration1);
    }

    #[test]
    fn test_model_cycle_friction_equal_to_tan_sticks() {
        for tilt in [6.283185307179586e-5, 0.1, 0.5, FRAC_PI_4, 1.2, 1.5] {
            let result = model_cycle(1, launch(3.0, tilt), tilt, tilt.tan(), G);
            assert!(!result.is_full, "tilt {tilt}");
            assert!(result.duration2.is_nan());
            assert_eq!(result.duration, result.duration1);
            assert_eq!(result.end_velocity.magnitude(), 0.0);
        }
    }

    #[test]
    fn test_slides_back_boundary() {
        assert!(slides_back(FRAC_PI_4, 0.3));
        assert!(!slides_back(FRAC_PI_4, 1.5));
        assert!(!slides_back(6.283185307179586e-5, 6.283185307179586e-5_f64.tan()));
        assert!(slides_back(0.5, 0.0));
    }

    #[test]
    fn test_model_sequence_decays() {
        let seq = model_sequence(launch(20.0, FRAC_PI_4), FRAC_PI_4, 0.3, G, 0.1, 1000);
        assert!(seq.len() > 1);
        for pair in seq.windows(2) {
            assert!(pair[1].start_velocity.magnitude() < pair[0].start_velocity.magnitude());
            assert_eq!(pair[1].number, pair[0].number + 1);
            assert_eq!(pair[1].start_velocity, (-pair[0].end_velocity).abs());
        }
        assert_eq!(seq[0].number, FIRST_CYCLE_NUMBER);
        let last = seq[seq.len() - 1];
        assert!(last.end_velocity.magnitude() <= 0.1);
    }

    #[test]
    fn test_model_sequence_single_non_full() {
        let seq = model_sequence(launch(20.0, FRAC_PI_4), FRAC_PI_4, 1.5, G, 0.1, 1000);
        assert_eq!(seq.len(), 1);
        assert!(!seq[0].is_full);
    }

    #[test]
    fn test_model_sequence_frictionless_capped() {
        let seq = model_sequence(launch(5.0, 0.4), 0.4, 0.0, G, 0.1, 25);
        assert_eq!(seq.len(), 25);
        assert!(seq.iter().all(|r| r.is_full));
    }

    #[test]
    fn test_model_ignores_launch_sign() {
        let up = model_cycle(1, launch(7.0, 0.6), 0.6, 0.2, G);
        let down = model_cycle(1, -launch(7.0, 0.6), 0.6, 0.2, G);
        assert_eq!(up, down);
    }
}
