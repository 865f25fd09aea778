//! End-to-end solve: construction, then exact search.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::adaptive::{AdaptiveConfig, AdaptiveRunner, RoundRecord, Termination};
use crate::constructive::{build_initial_tour, ConstructionConfig};
use crate::error::{OracleError, Result};
use crate::models::{Instance, Point, Tour};
use crate::search::{Incumbent, NoProgress, ProgressSink, SearchConfig, SearchEpisode};

/// How the exact phase is driven.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Strategy {
    /// Repeated ceiling probes below the heuristic tour.
    #[default]
    Adaptive,
    /// One search seeded with the heuristic tour.
    Direct,
}

impl Strategy {
    /// Parses `adaptive` or `direct` (case-insensitive).
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "adaptive" => Ok(Self::Adaptive),
            "direct" => Ok(Self::Direct),
            other => Err(OracleError::invalid_config(format!(
                "unknown strategy '{other}', expected 'adaptive' or 'direct'"
            ))),
        }
    }
}

/// Full solver configuration.
///
/// # Examples
///
/// ```
/// use u_tsp_oracle::solver::{OracleConfig, Strategy};
/// use u_tsp_oracle::constructive::ConstructionConfig;
///
/// let config = OracleConfig::default()
///     .with_strategy(Strategy::Direct)
///     .with_construction(ConstructionConfig::default().with_all_starts().with_two_opt(false));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct OracleConfig {
    pub strategy: Strategy,
    pub construction: ConstructionConfig,
    pub search: SearchConfig,
    pub adaptive: AdaptiveConfig,
}

impl OracleConfig {
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_construction(mut self, construction: ConstructionConfig) -> Self {
        self.construction = construction;
        self
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_adaptive(mut self, adaptive: AdaptiveConfig) -> Self {
        self.adaptive = adaptive;
        self
    }

    /// Validates every nested configuration.
    pub fn validate(&self) -> Result<()> {
        self.construction.validate()?;
        self.search.validate()?;
        self.adaptive.validate()
    }
}

/// Everything the shell needs to report a solve.
#[derive(Debug, Clone, Serialize)]
pub struct OracleResult {
    /// Seed the points came from, if generated.
    pub seed: Option<u64>,
    pub points: Vec<Point>,
    pub strategy: Strategy,
    /// Construction-phase tour.
    pub heuristic: Tour,
    /// Best tour found by the exact phase, starting at vertex 0.
    pub best: Tour,
    pub termination: Termination,
    /// Ceiling probes; empty for [`Strategy::Direct`].
    pub rounds: Vec<RoundRecord>,
    /// Complete tours evaluated during the exact phase.
    pub tours_evaluated: u64,
    /// Wall-clock time of the whole solve.
    pub elapsed: Duration,
}

impl OracleResult {
    /// `heuristic - best`.
    pub fn improvement(&self) -> f64 {
        self.heuristic.distance() - self.best.distance()
    }

    /// Improvement as a percentage of the heuristic length.
    pub fn improvement_percent(&self) -> f64 {
        if self.heuristic.distance() > 0.0 {
            self.improvement() / self.heuristic.distance() * 100.0
        } else {
            0.0
        }
    }

    pub fn cancelled(&self) -> bool {
        self.termination == Termination::Cancelled
    }
}

/// Solves instances with a fixed configuration.
///
/// # Examples
///
/// ```
/// use u_tsp_oracle::models::Instance;
/// use u_tsp_oracle::solver::{Oracle, OracleConfig};
///
/// let instance = Instance::random(9, 42).unwrap();
/// let result = Oracle::new(OracleConfig::default()).solve(&instance).unwrap();
/// assert!(result.best.distance() <= result.heuristic.distance());
/// assert!(result.improvement() >= 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Oracle {
    config: OracleConfig,
}

impl Oracle {
    pub fn new(config: OracleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Runs construction and the configured exact strategy.
    pub fn solve(&self, instance: &Instance) -> Result<OracleResult> {
        self.solve_with_cancel(instance, None, &mut NoProgress)
    }

    /// [`solve`](Self::solve) with a cancellation token and progress sink.
    pub fn solve_with_cancel(
        &self,
        instance: &Instance,
        cancel: Option<Arc<AtomicBool>>,
        sink: &mut dyn ProgressSink,
    ) -> Result<OracleResult> {
        self.config.validate()?;
        let started = Instant::now();

        let heuristic = build_initial_tour(instance, &self.config.construction)?;
        log::info!(
            "oracle: heuristic n={} length={:.6} strategy={:?}",
            instance.size(),
            heuristic.distance(),
            self.config.strategy
        );

        let (best, termination, rounds, tours_evaluated) = match self.config.strategy {
            Strategy::Adaptive => {
                let result = AdaptiveRunner::run_with_cancel(
                    instance,
                    &heuristic,
                    &self.config.adaptive,
                    &self.config.search,
                    cancel,
                    sink,
                )?;
                (result.tour, result.termination, result.rounds, result.tours_evaluated)
            }
            Strategy::Direct => {
                let mut episode = SearchEpisode::new(instance, cancel);
                let outcome =
                    episode.run(Incumbent::from_tour(&heuristic), &self.config.search, sink)?;
                let termination = if outcome.cancelled {
                    log::warn!("oracle: direct search cancelled");
                    Termination::Cancelled
                } else {
                    Termination::Exhausted
                };
                let best = outcome
                    .tour()
                    .unwrap_or_else(|| heuristic.clone())
                    .rotated_to(0);
                (best, termination, Vec::new(), outcome.tours_evaluated)
            }
        };

        let result = OracleResult {
            seed: instance.seed(),
            points: instance.points().to_vec(),
            strategy: self.config.strategy,
            heuristic,
            best,
            termination,
            rounds,
            tours_evaluated,
            elapsed: started.elapsed(),
        };
        log::info!(
            "oracle: done best={:.6} improvement={:.6} ({:.3}%) tours={} time={:.2}s",
            result.best.distance(),
            result.improvement(),
            result.improvement_percent(),
            result.tours_evaluated,
            result.elapsed.as_secs_f64()
        );
        Ok(result)
    }
}
