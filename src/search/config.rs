//! Search engine configuration.

use std::time::Duration;

use crate::error::{OracleError, Result};

/// Shortest allowed gap between two progress reports.
pub const MIN_PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Configuration for branch-and-bound episodes.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tsp_oracle::search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_progress_interval(Duration::from_millis(250))
///     .with_time_limit(Duration::from_secs(30));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Minimum wall-clock gap between progress callbacks.
    pub progress_interval: Duration,

    /// Wall-clock budget measured from the start of the episode.
    /// `None` runs to completion.
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            progress_interval: Duration::from_millis(500),
            time_limit: None,
        }
    }
}

impl SearchConfig {
    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.progress_interval < MIN_PROGRESS_INTERVAL {
            return Err(OracleError::invalid_config(format!(
                "progress_interval must be at least {}ms, got {}ms",
                MIN_PROGRESS_INTERVAL.as_millis(),
                self.progress_interval.as_millis()
            )));
        }
        if self.time_limit == Some(Duration::ZERO) {
            return Err(OracleError::invalid_config("time_limit must be positive"));
        }
        Ok(())
    }
}
