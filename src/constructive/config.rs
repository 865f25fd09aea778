//! Construction phase configuration.

use crate::error::{OracleError, Result};
use crate::local_search::DEFAULT_TWO_OPT_MAX_ITERATIONS;

/// Configuration for the initial-tour construction.
///
/// The default tries the first 5 start vertices and polishes the best
/// greedy tour with 2-opt. `with_all_starts().with_two_opt(false)` gives the
/// plain multi-start greedy over every vertex.
///
/// # Examples
///
/// ```
/// use u_tsp_oracle::constructive::ConstructionConfig;
///
/// let config = ConstructionConfig::default()
///     .with_max_starts(3)
///     .with_two_opt_max_iterations(50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ConstructionConfig {
    /// Number of start vertices tried, counting from vertex 0.
    /// `None` tries every vertex.
    pub max_starts: Option<usize>,

    /// Whether to refine the best greedy tour with 2-opt.
    pub two_opt: bool,

    /// Pass cap for 2-opt.
    pub two_opt_max_iterations: usize,
}

impl Default for ConstructionConfig {
    fn default() -> Self {
        Self {
            max_starts: Some(5),
            two_opt: true,
            two_opt_max_iterations: DEFAULT_TWO_OPT_MAX_ITERATIONS,
        }
    }
}

impl ConstructionConfig {
    pub fn with_max_starts(mut self, n: usize) -> Self {
        self.max_starts = Some(n);
        self
    }

    pub fn with_all_starts(mut self) -> Self {
        self.max_starts = None;
        self
    }

    pub fn with_two_opt(mut self, enabled: bool) -> Self {
        self.two_opt = enabled;
        self
    }

    pub fn with_two_opt_max_iterations(mut self, n: usize) -> Self {
        self.two_opt_max_iterations = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_starts == Some(0) {
            return Err(OracleError::invalid_config("max_starts must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConstructionConfig::default();
        assert_eq!(config.max_starts, Some(5));
        assert!(config.two_opt);
        assert_eq!(config.two_opt_max_iterations, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_all_starts() {
        let config = ConstructionConfig::default().with_all_starts();
        assert_eq!(config.max_starts, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_starts() {
        let config = ConstructionConfig::default().with_max_starts(0);
        assert!(config.validate().is_err());
    }
}
