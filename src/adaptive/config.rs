//! Adaptive ceiling configuration.

use crate::error::{OracleError, Result};

/// Configuration for the adaptive ceiling search.
///
/// `close_gap` is on by default: a run that never beats the baseline makes
/// one last probe at exactly the baseline length instead of returning the
/// baseline as soon as the relaxed ceiling reaches it. That probe makes the
/// result exact. `with_close_gap(false)` restores the plain give-up rule.
///
/// # Examples
///
/// ```
/// use u_tsp_oracle::adaptive::AdaptiveConfig;
///
/// let config = AdaptiveConfig::default()
///     .with_initial_ratio(0.85)
///     .with_step(0.05)
///     .with_max_rounds(50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AdaptiveConfig {
    /// First ceiling as a fraction of the baseline length.
    pub initial_ratio: f64,

    /// Relative shrink after a hit and growth after a miss.
    pub step: f64,

    /// Hard cap on ceiling probes.
    pub max_rounds: usize,

    /// Keep memoized MST weights between probes instead of clearing them.
    pub retain_mst_cache: bool,

    /// When the relaxed ceiling reaches the baseline without any hit, probe
    /// once at exactly the baseline length before giving up. Without this
    /// the band just below the baseline is never searched.
    pub close_gap: bool,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            initial_ratio: 0.90,
            step: 0.07,
            max_rounds: 200,
            retain_mst_cache: false,
            close_gap: true,
        }
    }
}

impl AdaptiveConfig {
    pub fn with_initial_ratio(mut self, ratio: f64) -> Self {
        self.initial_ratio = ratio;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_max_rounds(mut self, n: usize) -> Self {
        self.max_rounds = n;
        self
    }

    pub fn with_retain_mst_cache(mut self, retain: bool) -> Self {
        self.retain_mst_cache = retain;
        self
    }

    pub fn with_close_gap(mut self, close: bool) -> Self {
        self.close_gap = close;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_ratio > 0.0 && self.initial_ratio < 1.0) {
            return Err(OracleError::invalid_config(format!(
                "initial_ratio must be in (0, 1), got {}",
                self.initial_ratio
            )));
        }
        if !(self.step > 0.0 && self.step < 1.0) {
            return Err(OracleError::invalid_config(format!(
                "step must be in (0, 1), got {}",
                self.step
            )));
        }
        if self.max_rounds == 0 {
            return Err(OracleError::invalid_config("max_rounds must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AdaptiveConfig::default();
        assert!((config.initial_ratio - 0.90).abs() < 1e-10);
        assert!((config.step - 0.07).abs() < 1e-10);
        assert_eq!(config.max_rounds, 200);
        assert!(!config.retain_mst_cache);
        assert!(config.close_gap);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_ratio() {
        assert!(AdaptiveConfig::default().with_initial_ratio(1.0).validate().is_err());
        assert!(AdaptiveConfig::default().with_initial_ratio(0.0).validate().is_err());
        assert!(AdaptiveConfig::default()
            .with_initial_ratio(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_bad_step() {
        assert!(AdaptiveConfig::default().with_step(0.0).validate().is_err());
        assert!(AdaptiveConfig::default().with_step(1.5).validate().is_err());
    }

    #[test]
    fn test_validate_zero_rounds() {
        assert!(AdaptiveConfig::default().with_max_rounds(0).validate().is_err());
    }
}
