//! Segmentation of an engine run into motion cycles.
//!
//! A cycle is bounded by two consecutive collision events. Its middle point
//! is the turning point at the top of the slope, which the engine never
//! samples exactly, so the slowest stop sample inside the window stands in
//! for it.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, info};

use super::sample::Sample;

/// Number given to the first cycle on both the measured and model tracks.
pub const FIRST_CYCLE_NUMBER: usize = 1;

/// One excursion up the slope and, if full, back to the wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cycle {
    /// Dense, 1-based position in emission order.
    pub number: usize,
    /// Collision that launched the block up the slope.
    pub start: Sample,
    /// Slowest stop sample, the approximate turning point.
    pub middle: Sample,
    /// Next collision, or the end-of-run sample.
    pub end: Sample,
    /// Whether the block returned to the wall.
    pub is_full: bool,
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cycle(number={} is_full={} start={} middle={} end={})",
            self.number, self.is_full, self.start, self.middle, self.end
        )
    }
}

/// Group stop and collision samples into cycles.
///
/// Both inputs must be sorted by time, and `collision_events` must be framed
/// by the start and end-of-run samples. Each adjacent pair of collisions is a
/// window; the slowest stop sample strictly before the window's end becomes
/// the middle point (the earliest one on ties). Windows without a stop
/// sample produce no cycle, and numbering skips nothing. The stop index only
/// moves forward, so every stop sample is looked at once.
#[must_use]
pub fn segment(stop_events: &[Sample], collision_events: &[Sample], is_full: bool) -> Vec<Cycle> {
    let mut cycles = Vec::with_capacity(collision_events.len().saturating_sub(1));
    let mut stop_index = 0;

    for window in collision_events.windows(2) {
        let (start, end) = (window[0], window[1]);
        let mut turning_point: Option<Sample> = None;

        while let Some(candidate) = stop_events.get(stop_index) {
            if candidate.time() >= end.time() {
                break;
            }
            let slower = turning_point.map_or(true, |best| {
                let speed = candidate.velocity().magnitude();
                speed.cmp_value(&best.velocity().magnitude()) == Some(Ordering::Less)
            });
            if slower {
                turning_point = Some(*candidate);
            }
            stop_index += 1;
        }

        if let Some(middle) = turning_point {
            let cycle = Cycle {
                number: FIRST_CYCLE_NUMBER + cycles.len(),
                start,
                middle,
                end,
                is_full,
            };
            debug!(%cycle, "collected cycle");
            cycles.push(cycle);
        }
    }

    info!(cycles = cycles.len(), "collected cycles");
    cycles
}
