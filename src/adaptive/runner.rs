//! Adaptive ceiling loop around the branch-and-bound engine.
//!
//! # Algorithm
//!
//! Let `G` be the baseline tour length. Start with ceiling `C = r·G` and
//! run the search seeded with the bare distance `C`:
//!
//! - hit (a tour shorter than `C`): keep it, tighten `C = found·(1 - s)`;
//! - miss after an earlier hit: the previous hit is optimal, stop;
//! - miss with no hit yet: relax `C = C·(1 + s)`; once `C >= G`, stop and
//!   return the baseline (optionally after one last probe at `C = G`).
//!
//! A probe far below the optimum prunes almost everything at the root, so
//! the loop finds the optimum with cheap feasibility checks instead of one
//! wide search.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::error::Result;
use crate::models::{Instance, Tour};
use crate::mst::MstCacheStats;
use crate::search::{Incumbent, NoProgress, ProgressSink, SearchConfig, SearchEpisode};

use super::AdaptiveConfig;

/// One ceiling probe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundRecord {
    /// Zero-based probe index.
    pub round: usize,
    /// Distance ceiling searched below.
    pub ceiling: f64,
    /// `ceiling / baseline`.
    pub ratio: f64,
    /// Length of the tour found below the ceiling, if any.
    pub found: Option<f64>,
    /// Complete tours evaluated in this probe.
    pub tours_evaluated: u64,
    /// Search nodes visited in this probe.
    pub nodes_expanded: u64,
    /// MST cache state when the probe ended.
    pub mst_cache: MstCacheStats,
    /// Wall-clock time of this probe.
    pub elapsed: Duration,
}

/// Why a solve stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Termination {
    /// A hit was followed by a miss; the hit is optimal.
    Converged,
    /// No tour shorter than the baseline was found.
    BaselineOptimal,
    /// The round cap was reached; the best hit so far is returned.
    RoundLimit,
    /// A single unbounded-below search ran to completion.
    Exhausted,
    /// Cancelled or out of time; the best tour known so far is returned.
    Cancelled,
}

/// Result of an adaptive run.
#[derive(Debug, Clone, Serialize)]
pub struct AdaptiveResult {
    /// Best tour, starting at vertex 0.
    pub tour: Tour,
    /// Every probe in order.
    pub rounds: Vec<RoundRecord>,
    pub termination: Termination,
    /// Complete tours evaluated across all probes.
    pub tours_evaluated: u64,
    pub elapsed: Duration,
}

impl AdaptiveResult {
    pub fn cancelled(&self) -> bool {
        self.termination == Termination::Cancelled
    }
}

/// Executes the adaptive ceiling search.
///
/// # Examples
///
/// ```
/// use u_tsp_oracle::adaptive::{AdaptiveConfig, AdaptiveRunner};
/// use u_tsp_oracle::constructive::{build_initial_tour, ConstructionConfig};
/// use u_tsp_oracle::models::Instance;
/// use u_tsp_oracle::search::SearchConfig;
///
/// let instance = Instance::random(9, 42).unwrap();
/// let baseline = build_initial_tour(&instance, &ConstructionConfig::default()).unwrap();
/// let result = AdaptiveRunner::run(
///     &instance,
///     &baseline,
///     &AdaptiveConfig::default(),
///     &SearchConfig::default(),
/// )
/// .unwrap();
/// assert!(result.tour.distance() <= baseline.distance());
/// assert!(result.tour.is_permutation_of(9));
/// ```
pub struct AdaptiveRunner;

impl AdaptiveRunner {
    /// Runs the adaptive search from `baseline`.
    pub fn run(
        instance: &Instance,
        baseline: &Tour,
        config: &AdaptiveConfig,
        search: &SearchConfig,
    ) -> Result<AdaptiveResult> {
        Self::run_with_cancel(instance, baseline, config, search, None, &mut NoProgress)
    }

    /// Runs the adaptive search with an optional cancellation token.
    pub fn run_with_cancel(
        instance: &Instance,
        baseline: &Tour,
        config: &AdaptiveConfig,
        search: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
        sink: &mut dyn ProgressSink,
    ) -> Result<AdaptiveResult> {
        config.validate()?;
        search.validate()?;

        let baseline_distance = baseline.distance();
        let mut ceiling = baseline_distance * config.initial_ratio;
        let mut best: Option<Tour> = None;
        let mut closing_gap = false;
        let mut rounds = Vec::new();
        let mut episode = SearchEpisode::new(instance, cancel);

        log::info!(
            "adaptive: start baseline={:.6} ceiling={:.6} ({:.1}%)",
            baseline_distance,
            ceiling,
            config.initial_ratio * 100.0
        );

        let termination = 'rounds: {
            for round in 0..config.max_rounds {
                if !config.retain_mst_cache {
                    episode.clear_cache();
                }

                let outcome = episode.run(Incumbent::ceiling(ceiling), search, sink)?;
                let found = if outcome.improved { outcome.tour() } else { None };
                rounds.push(RoundRecord {
                    round,
                    ceiling,
                    ratio: ratio(ceiling, baseline_distance),
                    found: found.as_ref().map(Tour::distance),
                    tours_evaluated: outcome.tours_evaluated,
                    nodes_expanded: outcome.nodes_expanded,
                    mst_cache: outcome.mst_cache,
                    elapsed: outcome.elapsed,
                });

                if outcome.cancelled {
                    log::warn!("adaptive: cancelled round={round} ceiling={ceiling:.6}");
                    if found.is_some() {
                        best = found;
                    }
                    break 'rounds Termination::Cancelled;
                }

                match found {
                    Some(tour) => {
                        log::info!(
                            "adaptive: round={} ceiling={:.6} ({:.1}%) found={:.6} time={:?}",
                            round,
                            ceiling,
                            ratio(ceiling, baseline_distance) * 100.0,
                            tour.distance(),
                            outcome.elapsed
                        );
                        ceiling = tour.distance() * (1.0 - config.step);
                        best = Some(tour);
                    }
                    None => {
                        log::info!(
                            "adaptive: round={} ceiling={:.6} ({:.1}%) cut off time={:?}",
                            round,
                            ceiling,
                            ratio(ceiling, baseline_distance) * 100.0,
                            outcome.elapsed
                        );
                        if best.is_some() {
                            break 'rounds Termination::Converged;
                        }
                        if closing_gap {
                            break 'rounds Termination::BaselineOptimal;
                        }
                        ceiling *= 1.0 + config.step;
                        if ceiling >= baseline_distance {
                            if !config.close_gap {
                                break 'rounds Termination::BaselineOptimal;
                            }
                            ceiling = baseline_distance;
                            closing_gap = true;
                        }
                    }
                }
            }
            log::warn!("adaptive: round cap {} reached", config.max_rounds);
            Termination::RoundLimit
        };

        let tour = best.unwrap_or_else(|| baseline.clone()).rotated_to(0);
        log::info!(
            "adaptive: done termination={:?} best={:.6} rounds={} tours={}",
            termination,
            tour.distance(),
            rounds.len(),
            episode.total_tours_evaluated()
        );

        Ok(AdaptiveResult {
            tour,
            rounds,
            termination,
            tours_evaluated: episode.total_tours_evaluated(),
            elapsed: episode.elapsed(),
        })
    }
}

fn ratio(ceiling: f64, baseline: f64) -> f64 {
    if baseline > 0.0 {
        ceiling / baseline
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::{build_initial_tour, ConstructionConfig};
    use crate::models::Point;
    use crate::search::BranchAndBound;

    fn baseline(instance: &Instance) -> Tour {
        build_initial_tour(instance, &ConstructionConfig::default()).expect("valid")
    }

    fn run(instance: &Instance, config: &AdaptiveConfig) -> AdaptiveResult {
        AdaptiveRunner::run(instance, &baseline(instance), config, &SearchConfig::default())
            .expect("valid")
    }

    #[test]
    fn test_matches_exhaustive() {
        for seed in 0..6 {
            let instance = Instance::random(8, seed).expect("valid");
            let result = run(&instance, &AdaptiveConfig::default());
            let exact = BranchAndBound::exhaustive(&instance).expect("valid");
            assert!(
                (result.tour.distance() - exact.incumbent.distance()).abs() < 1e-9,
                "seed {seed}: adaptive {} vs exact {}",
                result.tour.distance(),
                exact.incumbent.distance()
            );
        }
    }

    #[test]
    fn test_square_baseline_is_optimal() {
        let instance = Instance::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
        ])
        .expect("valid");
        let result = run(&instance, &AdaptiveConfig::default());
        assert_eq!(result.termination, Termination::BaselineOptimal);
        assert!((result.tour.distance() - 4.0).abs() < 1e-10);
        // 0.9 → 0.963 → closing probe at 1.0
        assert_eq!(result.rounds.len(), 3);
        assert!((result.rounds[2].ratio - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_without_gap_closing() {
        let instance = Instance::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
        ])
        .expect("valid");
        let result = run(&instance, &AdaptiveConfig::default().with_close_gap(false));
        assert_eq!(result.termination, Termination::BaselineOptimal);
        assert_eq!(result.rounds.len(), 2);
    }

    fn farthest_neighbor_tour(instance: &Instance) -> Tour {
        let n = instance.size();
        let mut visited = vec![false; n];
        visited[0] = true;
        let mut order = vec![0];
        while order.len() < n {
            let last = order[order.len() - 1];
            let next = (0..n)
                .filter(|&v| !visited[v])
                .max_by(|&a, &b| instance.distance(last, a).total_cmp(&instance.distance(last, b)))
                .expect("unvisited vertex");
            visited[next] = true;
            order.push(next);
        }
        Tour::from_order(order, instance.distances())
    }

    #[test]
    fn test_improvement_converges() {
        let instance = Instance::random(8, 11).expect("valid");
        let exact = BranchAndBound::exhaustive(&instance).expect("valid");
        let poor = farthest_neighbor_tour(&instance);
        assert!(poor.distance() * 0.9 > exact.incumbent.distance());

        let result = AdaptiveRunner::run(
            &instance,
            &poor,
            &AdaptiveConfig::default(),
            &SearchConfig::default(),
        )
        .expect("valid");
        assert_eq!(result.termination, Termination::Converged);
        assert!((result.tour.distance() - exact.incumbent.distance()).abs() < 1e-9);
        assert_eq!(result.rounds.len(), 2);
        assert!(result.rounds[0].found.is_some());
        assert!(result.rounds[1].found.is_none());
        let total: u64 = result.rounds.iter().map(|r| r.tours_evaluated).sum();
        assert_eq!(total, result.tours_evaluated);
    }

    #[test]
    fn test_round_limit() {
        let instance = Instance::random(8, 11).expect("valid");
        let result = run(&instance, &AdaptiveConfig::default().with_max_rounds(1));
        assert_eq!(result.rounds.len(), 1);
        assert_eq!(result.termination, Termination::RoundLimit);
        assert!(result.tour.is_permutation_of(8));
    }

    #[test]
    fn test_retained_cache_same_answer() {
        let instance = Instance::random(8, 21).expect("valid");
        let cleared = run(&instance, &AdaptiveConfig::default());
        let retained = run(&instance, &AdaptiveConfig::default().with_retain_mst_cache(true));
        assert!((cleared.tour.distance() - retained.tour.distance()).abs() < 1e-12);
    }

    #[test]
    fn test_cache_cleared_every_round() {
        let instance = Instance::random(8, 21).expect("valid");
        let result = run(&instance, &AdaptiveConfig::default());
        assert!(result.rounds.len() >= 2);

        for record in &result.rounds {
            let fresh = BranchAndBound::run(
                &instance,
                Incumbent::ceiling(record.ceiling),
                &SearchConfig::default(),
            )
            .expect("valid");
            assert_eq!(record.mst_cache, fresh.mst_cache, "round {}", record.round);
        }
    }

    #[test]
    fn test_retained_cache_accumulates() {
        let instance = Instance::random(8, 21).expect("valid");
        let result = run(&instance, &AdaptiveConfig::default().with_retain_mst_cache(true));
        assert!(result.rounds.len() >= 2);

        for w in result.rounds.windows(2) {
            assert!(w[1].mst_cache.hits > w[0].mst_cache.hits);
            assert!(w[1].mst_cache.entries >= w[0].mst_cache.entries);
        }
    }

    #[test]
    fn test_cancelled_returns_baseline() {
        let instance = Instance::random(10, 2).expect("valid");
        let base = baseline(&instance);
        let flag = Arc::new(AtomicBool::new(true));
        let result = AdaptiveRunner::run_with_cancel(
            &instance,
            &base,
            &AdaptiveConfig::default(),
            &SearchConfig::default(),
            Some(flag),
            &mut NoProgress,
        )
        .expect("valid");
        assert!(result.cancelled());
        assert_eq!(result.tour, base);
        assert_eq!(result.rounds.len(), 1);
    }

    #[test]
    fn test_invalid_config() {
        let instance = Instance::random(5, 2).expect("valid");
        let result = AdaptiveRunner::run(
            &instance,
            &baseline(&instance),
            &AdaptiveConfig::default().with_step(2.0),
            &SearchConfig::default(),
        );
        assert!(result.is_err());
    }
}
