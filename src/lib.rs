//! # slopecycle
//!
//! Cycle analysis and closed-form model validation for a block sliding on
//! an inclined plane with Coulomb friction.
//!
//! A block is launched up a slope from a wall at its foot. It climbs, stops,
//! slides back (when friction is low enough) and bounces off the wall, over
//! and over. This crate:
//! - Groups engine events (wall collisions, stops) into cycles
//! - Derives measured per-cycle results (durations, velocities, reach)
//! - Predicts the same results from kinematics
//! - Reports the absolute and relative error of the model per cycle
//!
//! ## Example
//!
//! ```rust
//! use slopecycle::prelude::*;
//!
//! let config = AnalysisConfig::builder().precision(10).build();
//! let engine = AnalysisEngine::new(config.settings());
//! let launch = LaunchConditions::new(0.785, 1.0, 20.0, 0.3).unwrap();
//!
//! let model = engine.model(&launch);
//! assert!(model[0].is_full);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::suboptimal_flops,
    clippy::imprecise_flops,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,
)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod launch;
pub mod logging;
pub mod math;
pub mod output;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::analysis::{
        AnalysisEngine, AnalysisReport, Cycle, CycleError, CycleResult, Sample,
    };
    pub use crate::config::{AnalysisConfig, AnalysisConfigBuilder, AnalysisSettings};
    pub use crate::error::{SlopeError, SlopeResult};
    pub use crate::events::{EventLog, EventRecorder, RawSample, StopDetector};
    pub use crate::launch::{LaunchConditions, RunPlan};
    pub use crate::math::{Precision, Quantity, Unit, Vector};
    pub use crate::output::ReportExporter;
}

/// Re-export for public API
pub use error::{SlopeError, SlopeResult};
