//! Error of the model against the measurement.
//!
//! The measured value is the reference: relative error is the absolute
//! error divided by the measured value and is NaN when that value is zero.
//! Undefined inputs (a NaN `duration2`) give NaN errors.

use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

use super::result::CycleResult;
use crate::math::{Quantity, Vector};

/// Absolute and relative error of one scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScalarError {
    /// `|measured - model|`, in the measured unit.
    pub abs: Quantity,
    /// `abs / measured`, dimensionless.
    pub rel: Quantity,
}

impl ScalarError {
    /// Error of `model` against `measured`.
    #[must_use]
    pub fn between(measured: Quantity, model: Quantity) -> Self {
        let abs = (measured - model).abs();
        let rel = if measured.value() == 0.0 {
            Quantity::nan()
        } else {
            Quantity::new(abs.value() / measured.value(), None, abs.precision())
        };
        Self { abs, rel }
    }
}

impl fmt::Display for ScalarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(abs={} rel={})", self.abs, self.rel)
    }
}

/// Per-component error of a vector field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VectorError {
    /// First component.
    pub x: ScalarError,
    /// Second component.
    pub y: ScalarError,
    /// Magnitude.
    pub magnitude: ScalarError,
}

impl VectorError {
    /// Error of `model` against `measured`, component by component.
    #[must_use]
    pub fn between(measured: Vector, model: Vector) -> Self {
        Self {
            x: ScalarError::between(measured.x(), model.x()),
            y: ScalarError::between(measured.y(), model.y()),
            magnitude: ScalarError::between(measured.magnitude(), model.magnitude()),
        }
    }
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x={} y={} value={})", self.x, self.y, self.magnitude)
    }
}

/// Errors of every field of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CycleError {
    /// Cycle number of the model result.
    pub number: usize,
    /// Up-slope time.
    pub duration1: ScalarError,
    /// Down-slope time.
    pub duration2: ScalarError,
    /// Total time.
    pub duration: ScalarError,
    /// Launch velocity.
    pub start_velocity: VectorError,
    /// Return velocity.
    pub end_velocity: VectorError,
    /// Reach.
    pub reach: VectorError,
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CycleError(number={} duration1={} duration2={} duration={} \
             start_velocity={} end_velocity={} reach={})",
            self.number,
            self.duration1,
            self.duration2,
            self.duration,
            self.start_velocity,
            self.end_velocity,
            self.reach
        )
    }
}

/// Compare one measured result with its prediction.
#[must_use]
pub fn compute_error(measured: &CycleResult, model: &CycleResult) -> CycleError {
    CycleError {
        number: model.number,
        duration1: ScalarError::between(measured.duration1, model.duration1),
        duration2: ScalarError::between(measured.duration2, model.duration2),
        duration: ScalarError::between(measured.duration, model.duration),
        start_velocity: VectorError::between(measured.start_velocity, model.start_velocity),
        end_velocity: VectorError::between(measured.end_velocity, model.end_velocity),
        reach: VectorError::between(measured.reach, model.reach),
    }
}

/// Compare the two tracks index by index, up to the shorter one.
#[must_use]
pub fn compare_tracks(measured: &[CycleResult], model: &[CycleResult]) -> Vec<CycleError> {
    if measured.len() != model.len() {
        warn!(
            measured = measured.len(),
            model = model.len(),
            "track lengths differ, comparing the common prefix"
        );
    }

    let errors: Vec<CycleError> = measured
        .iter()
        .zip(model)
        .map(|(measured, model)| {
            let error = compute_error(measured, model);
            debug!(%error, "prepared error");
            error
        })
        .collect();
    info!(errors = errors.len(), "prepared errors");
    errors
}
