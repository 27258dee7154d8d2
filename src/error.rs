//! Error types for slopecycle.
//!
//! The analytical core is total: undefined values travel through it as NaN
//! [`Quantity`](crate::math::Quantity) sentinels. `SlopeError` is only raised
//! at the boundaries (configuration, launch conditions, event logs, output).

use thiserror::Error;

/// Result type alias for slopecycle operations.
pub type SlopeResult<T> = Result<T, SlopeError>;

/// Unified error type for all slopecycle boundary operations.
#[derive(Debug, Error)]
pub enum SlopeError {
    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== Input Errors =====
    /// Launch condition outside of its admissible range.
    #[error("Invalid launch {field}: {message}")]
    InvalidLaunch {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// Engine event log violates the ordering preconditions.
    #[error("Event log error: {message}")]
    EventLog {
        /// Description of the violation.
        message: String,
    },

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Logging subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),
}

impl SlopeError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a launch condition error.
    #[must_use]
    pub fn invalid_launch(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidLaunch {
            field,
            message: message.into(),
        }
    }

    /// Create an event log error.
    #[must_use]
    pub fn event_log(message: impl Into<String>) -> Self {
        Self::EventLog {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create an I/O error with a message (wraps in `std::io::Error`).
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(std::io::Error::other(message.into()))
    }

    /// Check if this error was caused by data handed in from outside
    /// (launch conditions or engine events) rather than by the environment.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidLaunch { .. } | Self::EventLog { .. })
    }
}
