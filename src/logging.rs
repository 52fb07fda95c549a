//! Logging configuration and initialization
//!
//! Installs a `tracing-subscriber` formatter for binaries and test harnesses
//! that want [`log_error`](crate::sink::log_error) output without wiring a
//! subscriber themselves. Libraries should leave this to their caller.

use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Logging configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// Verbosity level, usually the number of `-v` flags
    pub verbose: u8,
}

impl LogConfig {
    pub fn new(verbose: u8) -> Self {
        Self { verbose }
    }

    /// Filter directive for the configured verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// `RUST_LOG` when set, the configured verbosity otherwise
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.log_level()))
    }
}

/// Errors raised while installing the global subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to install tracing subscriber: {0}")]
    Init(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Install the global `tracing` subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_target(config.verbose >= 2)
        .with_thread_ids(config.verbose >= 3)
        .with_line_number(config.verbose >= 3)
        .try_init()
        .map_err(LoggingError::Init)?;

    debug!("Logging initialized with verbosity level: {}", config.verbose);
    Ok(())
}
