//! Engine event stream.
//!
//! A run of the physics engine is summarised as an [`EventLog`]: the block
//! state at start and end, every wall collision, and the near-stop samples.
//! All samples are in the engine's own frame and units (screen coordinates,
//! magnified by the length scale). Logs are read from JSON or YAML, or
//! built live with an [`EventRecorder`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::config::AnalysisSettings;
use crate::error::{SlopeError, SlopeResult};
use crate::launch::RunPlan;

/// One block state reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    /// Timestamp in seconds.
    pub time: f64,
    /// Position, screen frame.
    pub position: [f64; 2],
    /// Velocity, screen frame.
    pub velocity: [f64; 2],
}

impl RawSample {
    /// Create a sample.
    #[must_use]
    pub const fn new(time: f64, position: [f64; 2], velocity: [f64; 2]) -> Self {
        Self {
            time,
            position,
            velocity,
        }
    }

    fn is_finite(&self) -> bool {
        self.time.is_finite()
            && self.position.iter().all(|c| c.is_finite())
            && self.velocity.iter().all(|c| c.is_finite())
    }
}

/// Classifies engine samples as near-stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopDetector {
    threshold: f64,
}

impl StopDetector {
    /// Detector with a threshold in engine units.
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Detector for a magnified run: the stop threshold times the length
    /// scale.
    #[must_use]
    pub fn from_settings(settings: &AnalysisSettings) -> Self {
        Self::new(settings.stop_threshold * settings.length_scale)
    }

    /// Threshold in engine units.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Both velocity components are below the threshold.
    #[must_use]
    pub fn is_stop(&self, sample: &RawSample) -> bool {
        sample.velocity[0].abs() < self.threshold && sample.velocity[1].abs() < self.threshold
    }
}

/// Everything the engine reported during one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventLog {
    /// State when the run started.
    pub start: RawSample,
    /// State when the run ended.
    pub end: RawSample,
    /// Block-wall collisions, ascending in time.
    #[serde(default)]
    pub collisions: Vec<RawSample>,
    /// Samples already classified as stops, ascending in time.
    #[serde(default)]
    pub stops: Vec<RawSample>,
    /// Unclassified per-frame samples, ascending in time.
    #[serde(default)]
    pub frames: Vec<RawSample>,
}

impl EventLog {
    /// Load a log, picking the format from the extension
    /// (`.json`, `.yaml` or `.yml`).
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, the extension is unknown,
    /// or parsing fails.
    pub fn load<P: AsRef<Path>>(path: P) -> SlopeResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        let content = std::fs::read_to_string(path)?;
        let log = match extension.as_deref() {
            Some("json") => Self::from_json(&content)?,
            Some("yaml" | "yml") => Self::from_yaml(&content)?,
            _ => {
                return Err(SlopeError::event_log(format!(
                    "unsupported event log format: {} (expected .json, .yaml or .yml)",
                    path.display()
                )))
            }
        };

        info!(
            path = %path.display(),
            collisions = log.collisions.len(),
            stops = log.stops.len(),
            frames = log.frames.len(),
            "event log loaded"
        );
        Ok(log)
    }

    /// Parse a JSON log.
    ///
    /// # Errors
    ///
    /// Returns error if parsing fails.
    pub fn from_json(json: &str) -> SlopeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a YAML log.
    ///
    /// # Errors
    ///
    /// Returns error if parsing fails.
    pub fn from_yaml(yaml: &str) -> SlopeResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> SlopeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the ordering preconditions of segmentation.
    ///
    /// # Errors
    ///
    /// Returns [`SlopeError::EventLog`] if a value is not finite, a section
    /// is out of time order, or an event lies outside `[start, end]`.
    pub fn validate(&self) -> SlopeResult<()> {
        if !(self.start.is_finite() && self.end.is_finite()) {
            return Err(SlopeError::event_log("start or end has a non-finite value"));
        }
        if self.start.time > self.end.time {
            return Err(SlopeError::event_log(format!(
                "run ends ({}) before it starts ({})",
                self.end.time, self.start.time
            )));
        }

        for (section, samples) in self.sections() {
            for (index, sample) in samples.iter().enumerate() {
                if !sample.is_finite() {
                    return Err(SlopeError::event_log(format!(
                        "{section}[{index}] has a non-finite value"
                    )));
                }
                if sample.time < self.start.time || sample.time > self.end.time {
                    return Err(SlopeError::event_log(format!(
                        "{section}[{index}] at t={} lies outside the run [{}, {}]",
                        sample.time, self.start.time, self.end.time
                    )));
                }
            }
            if let Some(index) = samples.windows(2).position(|w| w[0].time > w[1].time) {
                return Err(SlopeError::event_log(format!(
                    "{section}[{}] at t={} precedes {section}[{index}] at t={}",
                    index + 1,
                    samples[index + 1].time,
                    samples[index].time
                )));
            }
        }
        Ok(())
    }

    fn sections(&self) -> [(&'static str, &[RawSample]); 3] {
        [
            ("collisions", self.collisions.as_slice()),
            ("stops", self.stops.as_slice()),
            ("frames", self.frames.as_slice()),
        ]
    }

    /// Collision events framed by the start and end samples.
    #[must_use]
    pub fn collision_events(&self) -> Vec<RawSample> {
        let mut events = Vec::with_capacity(self.collisions.len() + 2);
        events.push(self.start);
        events.extend_from_slice(&self.collisions);
        events.push(self.end);
        events
    }

    /// Explicit stops merged in time order with the frames `detector`
    /// classifies as stops.
    #[must_use]
    pub fn stop_events(&self, detector: &StopDetector) -> Vec<RawSample> {
        let mut events: Vec<RawSample> = self
            .stops
            .iter()
            .chain(self.frames.iter().filter(|frame| detector.is_stop(frame)))
            .copied()
            .collect();
        events.sort_by(|a, b| a.time.total_cmp(&b.time));
        debug!(
            explicit = self.stops.len(),
            detected = events.len() - self.stops.len(),
            "stop events collected"
        );
        events
    }
}

/// Accumulates an [`EventLog`] while an engine run is in progress.
#[derive(Debug, Clone)]
pub struct EventRecorder {
    plan: RunPlan,
    detector: StopDetector,
    start: RawSample,
    collisions: Vec<RawSample>,
    stops: Vec<RawSample>,
}

impl EventRecorder {
    /// Start recording from the initial block state.
    #[must_use]
    pub const fn new(plan: RunPlan, detector: StopDetector, start: RawSample) -> Self {
        Self {
            plan,
            detector,
            start,
            collisions: Vec::new(),
            stops: Vec::new(),
        }
    }

    /// Record a block-wall collision.
    pub fn record_collision(&mut self, sample: RawSample) {
        debug!(?sample, "block-wall collision");
        self.collisions.push(sample);
    }

    /// Inspect a frame, keeping it if the block is near a stop.
    /// Returns whether it was kept.
    pub fn record_frame(&mut self, sample: RawSample) -> bool {
        let stopped = self.detector.is_stop(&sample);
        if stopped {
            debug!(?sample, "block stop");
            self.stops.push(sample);
        }
        stopped
    }

    /// Whether the run has produced enough events.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.plan.is_complete(self.collisions.len(), self.stops.len())
    }

    /// Close the run with the final block state.
    #[must_use]
    pub fn finish(self, end: RawSample) -> EventLog {
        info!(
            duration = end.time - self.start.time,
            collisions = self.collisions.len(),
            stops = self.stops.len(),
            "run recorded"
        );
        EventLog {
            start: self.start,
            end,
            collisions: self.collisions,
            stops: self.stops,
            frames: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: f64, velocity: [f64; 2]) -> RawSample {
        RawSample::new(time, [100.0, 700.0], velocity)
    }

    fn log() -> EventLog {
        EventLog {
            start: sample(0.0, [50.0, -50.0]),
            end: sample(10.0, [0.0, 0.0]),
            collisions: vec![sample(3.0, [-20.0, 20.0]), sample(6.0, [-10.0, 10.0])],
            stops: vec![sample(1.5, [0.1, 0.1])],
            frames: vec![
                sample(4.0, [5.0, 5.0]),
                sample(4.5, [0.5, -0.5]),
                sample(1.0, [0.2, 0.2]),
            ],
        }
    }

    #[test]
    fn test_collision_events_framed() {
        let events = log().collision_events();
        let times: Vec<f64> = events.iter().map(|e| e.time).collect();
        assert_eq!(times, vec![0.0, 3.0, 6.0, 10.0]);
    }

    #[test]
    fn test_stop_detector() {
        let detector = StopDetector::new(1.0);
        assert!(detector.is_stop(&sample(0.0, [0.5, -0.9])));
        assert!(!detector.is_stop(&sample(0.0, [0.5, -1.0])));
        assert!(!detector.is_stop(&sample(0.0, [2.0, 0.0])));
    }

    #[test]
    fn test_stop_detector_from_settings() {
        let settings = AnalysisSettings::default();
        let detector = StopDetector::from_settings(&settings);
        assert!((detector.threshold() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_stop_events_merged_in_time_order() {
        let events = log().stop_events(&StopDetector::new(1.0));
        let times: Vec<f64> = events.iter().map(|e| e.time).collect();
        assert_eq!(times, vec![1.0, 1.5, 4.5]);
    }

    #[test]
    fn test_validate_rejects_unordered_collisions() {
        let mut log = log();
        log.frames.clear();
        assert!(log.validate().is_ok());

        log.collisions.swap(0, 1);
        let err = log.validate().unwrap_err();
        assert!(err.is_input_error());
        assert!(err.to_string().contains("collisions[1]"));
    }

    #[test]
    fn test_validate_rejects_event_outside_run() {
        let mut log = log();
        log.frames.clear();
        log.stops.push(sample(12.0, [0.0, 0.0]));
        let err = log.validate().unwrap_err();
        assert!(err.to_string().contains("outside the run"));
    }

    #[test]
    fn test_validate_rejects_reversed_run() {
        let mut log = log();
        log.end.time = -1.0;
        assert!(log.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut log = log();
        log.frames.clear();
        log.stops[0].velocity[1] = f64::NAN;
        let err = log.validate().unwrap_err();
        assert!(err.to_string().contains("non-finite"));
    }

    #[test]
    fn test_json_and_yaml_agree() {
        let json = r#"{
            "start": {"time": 0.0, "position": [1.0, 2.0], "velocity": [3.0, 4.0]},
            "end": {"time": 1.0, "position": [1.0, 2.0], "velocity": [0.0, 0.0]},
            "collisions": [{"time": 0.5, "position": [1.0, 2.0], "velocity": [-3.0, -4.0]}]
        }"#;
        let yaml = r"
start: {time: 0.0, position: [1.0, 2.0], velocity: [3.0, 4.0]}
end: {time: 1.0, position: [1.0, 2.0], velocity: [0.0, 0.0]}
collisions:
  - {time: 0.5, position: [1.0, 2.0], velocity: [-3.0, -4.0]}
";
        let from_json = EventLog::from_json(json).unwrap();
        let from_yaml = EventLog::from_yaml(yaml).unwrap();
        assert_eq!(from_json, from_yaml);
        assert!(from_json.stops.is_empty());
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let log = log();

        let json_path = dir.path().join("run.json");
        std::fs::write(&json_path, log.to_json().unwrap()).unwrap();
        assert_eq!(EventLog::load(&json_path).unwrap(), log);

        let yaml_path = dir.path().join("run.YML");
        std::fs::write(&yaml_path, serde_yaml::to_string(&log).unwrap()).unwrap();
        assert_eq!(EventLog::load(&yaml_path).unwrap(), log);

        let txt_path = dir.path().join("run.txt");
        std::fs::write(&txt_path, "").unwrap();
        assert!(EventLog::load(&txt_path).unwrap_err().is_input_error());
    }

    #[test]
    fn test_recorder_follows_collision_plan() {
        let mut recorder = EventRecorder::new(
            RunPlan::Collisions(1),
            StopDetector::new(1.0),
            sample(0.0, [10.0, -10.0]),
        );
        assert!(recorder.record_frame(sample(0.5, [0.1, 0.1])));
        assert!(!recorder.record_frame(sample(0.6, [3.0, 3.0])));
        recorder.record_collision(sample(1.0, [-5.0, 5.0]));
        assert!(!recorder.is_complete());
        recorder.record_collision(sample(2.0, [-2.0, 2.0]));
        assert!(recorder.is_complete());

        let log = recorder.finish(sample(2.5, [0.0, 0.0]));
        assert_eq!(log.collisions.len(), 2);
        assert_eq!(log.stops.len(), 1);
        assert!(log.validate().is_ok());
    }

    #[test]
    fn test_recorder_follows_stop_budget() {
        let mut recorder = EventRecorder::new(
            RunPlan::Stops(2),
            StopDetector::new(1.0),
            sample(0.0, [10.0, -10.0]),
        );
        for i in 0..3 {
            assert!(!recorder.is_complete());
            recorder.record_frame(sample(f64::from(i), [0.0, 0.0]));
        }
        assert!(recorder.is_complete());
    }
}
