//! Observed block states in the analysis frame.

use serde::Serialize;
use std::fmt;

use crate::config::AnalysisSettings;
use crate::events::RawSample;
use crate::math::{Quantity, Unit, Vector};

/// One observation: timestamp, position and velocity.
///
/// Positions and velocities are in the "up the slope is positive" frame,
/// still magnified by the length scale of the engine run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    time: Quantity,
    position: Vector,
    velocity: Vector,
}

impl Sample {
    /// Create a sample from values already in the analysis frame.
    #[must_use]
    pub const fn new(time: Quantity, position: Vector, velocity: Vector) -> Self {
        Self {
            time,
            position,
            velocity,
        }
    }

    /// Convert an engine sample. Position is mapped as a point (origin
    /// moves to the bottom of the screen), velocity as a free vector.
    #[must_use]
    pub fn from_raw(raw: &RawSample, settings: &AnalysisSettings) -> Self {
        let precision = settings.precision;
        let [px, py] = raw.position;
        let [vx, vy] = raw.velocity;

        Self {
            time: precision.quantity(raw.time, Some(Unit::Time)),
            position: Vector::from_f64(px, py, Some(Unit::Distance), precision)
                .translated_abs(settings.frame_height),
            velocity: Vector::from_f64(vx, vy, Some(Unit::Velocity), precision).translated(),
        }
    }

    /// Timestamp.
    #[must_use]
    pub const fn time(&self) -> Quantity {
        self.time
    }

    /// Position.
    #[must_use]
    pub const fn position(&self) -> Vector {
        self.position
    }

    /// Velocity.
    #[must_use]
    pub const fn velocity(&self) -> Vector {
        self.velocity
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sample(time={} position={} velocity={})",
            self.time, self.position, self.velocity
        )
    }
}

/// Convert a sequence of engine samples, keeping order.
#[must_use]
pub fn ingest(raw: &[RawSample], settings: &AnalysisSettings) -> Vec<Sample> {
    raw.iter()
        .map(|sample| Sample::from_raw(sample, settings))
        .collect()
}
