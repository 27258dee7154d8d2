//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence over the configured level.

use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LogConfig, LogTarget};
use crate::error::{SlopeError, SlopeResult};

/// Filter directive used when `RUST_LOG` is not set.
#[must_use]
pub fn default_directive(config: &LogConfig, verbose: bool) -> String {
    if verbose {
        "debug".to_string()
    } else {
        config.level.to_lowercase()
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init_logging(config: &LogConfig, verbose: bool) -> SlopeResult<()> {
    let directive = default_directive(config, verbose);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directive));

    let installed = match config.target {
        LogTarget::Console => fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::File => {
            if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.path)?;
            fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    installed.map_err(|e| SlopeError::Logging(e.to_string()))?;
    tracing::debug!(target = ?config.target, %directive, "logging initialised");
    Ok(())
}
