//! One-shot branch-and-bound entry points.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::error::Result;
use crate::models::Instance;

use super::{Incumbent, NoProgress, ProgressSink, SearchConfig, SearchEpisode, SearchOutcome};

/// Runs a single branch-and-bound episode.
///
/// # Examples
///
/// ```
/// use u_tsp_oracle::models::Instance;
/// use u_tsp_oracle::search::{BranchAndBound, Incumbent, SearchConfig};
///
/// let instance = Instance::random(8, 42).unwrap();
/// let exact = BranchAndBound::exhaustive(&instance).unwrap();
/// let seeded = BranchAndBound::run(
///     &instance,
///     Incumbent::ceiling(exact.incumbent.distance() + 1.0),
///     &SearchConfig::default(),
/// )
/// .unwrap();
/// assert!((seeded.incumbent.distance() - exact.incumbent.distance()).abs() < 1e-9);
/// ```
pub struct BranchAndBound;

impl BranchAndBound {
    /// Searches below `seed` with no cancellation and no progress sink.
    pub fn run(
        instance: &Instance,
        seed: Incumbent,
        config: &SearchConfig,
    ) -> Result<SearchOutcome> {
        Self::run_with_cancel(instance, seed, config, None, &mut NoProgress)
    }

    /// Searches below `seed` with an optional cancellation token.
    ///
    /// If `cancel` is set to `true` during the run, the search unwinds at
    /// its next step and the outcome holds the best tour found so far.
    pub fn run_with_cancel(
        instance: &Instance,
        seed: Incumbent,
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
        sink: &mut dyn ProgressSink,
    ) -> Result<SearchOutcome> {
        SearchEpisode::new(instance, cancel).run(seed, config, sink)
    }

    /// Unbounded search: the proven-optimal tour, without any heuristic
    /// seed. Exponential; meant for small instances and cross-checks.
    pub fn exhaustive(instance: &Instance) -> Result<SearchOutcome> {
        Self::run(instance, Incumbent::unbounded(), &SearchConfig::default())
    }
}
