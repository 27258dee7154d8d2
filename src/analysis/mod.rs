//! Cycle analysis and closed-form model.
//!
//! Data flows leaves first:
//!
//! 1. [`sample`]: engine samples converted to the analysis frame
//! 2. [`cycle`]: collision and stop samples grouped into cycles
//! 3. [`result`]: measured summaries, and the independent model track
//! 4. [`comparison`]: per-field error of model against measurement
//!
//! [`AnalysisEngine`] runs the whole chain with explicit settings.

pub mod comparison;
pub mod cycle;
pub mod engine;
pub mod result;
pub mod sample;

pub use comparison::{compare_tracks, compute_error, CycleError, ScalarError, VectorError};
pub use cycle::{segment, Cycle, FIRST_CYCLE_NUMBER};
pub use engine::{AnalysisEngine, AnalysisReport};
pub use result::{
    derive_measured, derive_measured_track, model_cycle, model_sequence, slides_back,
    CycleResult,
};
pub use sample::Sample;
