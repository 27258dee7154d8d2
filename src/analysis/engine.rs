//! End-to-end analysis of one run.

use serde::Serialize;
use tracing::{info, info_span, warn};

use super::comparison::{compare_tracks, CycleError};
use super::cycle::segment;
use super::result::{derive_measured_track, model_sequence, CycleResult};
use super::sample::ingest;
use crate::config::AnalysisSettings;
use crate::error::SlopeResult;
use crate::events::{EventLog, StopDetector};
use crate::launch::{LaunchConditions, RunPlan};

/// Stateless pipeline from engine events to per-cycle comparisons.
///
/// All parameters are captured once at construction; every method is a
/// pure function of its arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnalysisEngine {
    settings: AnalysisSettings,
}

impl AnalysisEngine {
    /// Create an engine.
    #[must_use]
    pub const fn new(settings: AnalysisSettings) -> Self {
        Self { settings }
    }

    /// Captured settings.
    #[must_use]
    pub const fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Stop detector matching the engine run.
    #[must_use]
    pub fn stop_detector(&self) -> StopDetector {
        StopDetector::from_settings(&self.settings)
    }

    /// Predicted cycle sequence for a launch.
    #[must_use]
    pub fn model(&self, launch: &LaunchConditions) -> Vec<CycleResult> {
        let _span = info_span!("model").entered();
        model_sequence(
            launch.initial_velocity(self.settings.precision),
            launch.tilt_rad(),
            launch.friction(),
            self.settings.g,
            self.settings.stop_threshold,
            self.settings.max_model_cycles,
        )
    }

    /// How long the engine must run for a launch.
    #[must_use]
    pub fn plan(&self, launch: &LaunchConditions) -> RunPlan {
        RunPlan::from_model(&self.model(launch))
    }

    /// Measured cycle results of a run.
    #[must_use]
    pub fn measure(&self, events: &EventLog, is_full: bool) -> Vec<CycleResult> {
        let _span = info_span!("measure", is_full).entered();
        let collisions = ingest(&events.collision_events(), &self.settings);
        let stops = ingest(&events.stop_events(&self.stop_detector()), &self.settings);
        let cycles = segment(&stops, &collisions, is_full);
        derive_measured_track(&cycles, self.settings.length_scale)
    }

    /// Analyse a run: predict, measure and compare.
    ///
    /// # Errors
    ///
    /// Returns [`SlopeError::EventLog`](crate::error::SlopeError::EventLog)
    /// if the events violate the ordering preconditions.
    pub fn run(&self, launch: &LaunchConditions, events: &EventLog) -> SlopeResult<AnalysisReport> {
        events.validate()?;

        let model = self.model(launch);
        let is_full = model.first().is_some_and(|result| result.is_full);
        let measured = self.measure(events, is_full);
        let report = AnalysisReport::new(measured, model);

        info!(cycles = report.len(), is_full, "analysis finished");
        Ok(report)
    }
}

/// Index-aligned measured results, model results and errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Measured track.
    pub measured: Vec<CycleResult>,
    /// Model track.
    pub model: Vec<CycleResult>,
    /// Error of each model result against its measured counterpart.
    pub errors: Vec<CycleError>,
}

impl AnalysisReport {
    /// Build a report from two tracks, cut to the shorter one.
    #[must_use]
    pub fn new(mut measured: Vec<CycleResult>, mut model: Vec<CycleResult>) -> Self {
        let errors = compare_tracks(&measured, &model);
        if measured.len() != model.len() {
            warn!(
                measured = measured.len(),
                model = model.len(),
                kept = errors.len(),
                "report truncated to the shorter track"
            );
        }
        measured.truncate(errors.len());
        model.truncate(errors.len());
        Self {
            measured,
            model,
            errors,
        }
    }

    /// Number of cycles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether no cycle could be compared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Rows of `(measured, model, error)`.
    pub fn rows(&self) -> impl Iterator<Item = (&CycleResult, &CycleResult, &CycleError)> {
        self.measured
            .iter()
            .zip(&self.model)
            .zip(&self.errors)
            .map(|((measured, model), error)| (measured, model, error))
    }
}
