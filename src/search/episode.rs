//! One branch-and-bound search context.
//!
//! # Algorithm
//!
//! Depth-first over partial paths rooted at vertex 0. At every node:
//!
//! ```text
//! bound = partial(path) + mst(unvisited) + min d(first, u) + min d(last, u)
//! ```
//!
//! over unvisited `u`. The node is pruned when `bound >= incumbent`. A
//! complete path closes back to vertex 0 and replaces the incumbent only
//! when strictly shorter. Successors are tried ranked neighbors first, then
//! the remaining unvisited vertices by ascending distance.
//!
//! The visited markers and the path are a single buffer pushed on descent
//! and popped on backtrack, so exactly one root-to-node path exists at any
//! time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::Result;
use crate::models::{Instance, Tour};
use crate::mst::{MstCacheStats, MstOracle};

use super::progress::ProgressThrottle;
use super::{Incumbent, Progress, ProgressSink, SearchConfig};

/// Deadline and progress checks read the clock once per this many nodes.
const CLOCK_CHECK_MASK: u64 = 0xFF;

/// Result of one [`SearchEpisode::run`].
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// Best tour found, or the untouched seed if nothing beat it.
    pub incumbent: Incumbent,

    /// Whether a tour strictly shorter than the seed distance was found.
    pub improved: bool,

    /// Complete tours that reached the closing step.
    pub tours_evaluated: u64,

    /// Search nodes visited (bound computed).
    pub nodes_expanded: u64,

    /// Nodes cut off by the lower bound.
    pub nodes_pruned: u64,

    /// MST cache state at the end of the run.
    pub mst_cache: MstCacheStats,

    /// Wall-clock time of this run.
    pub elapsed: Duration,

    /// Whether the run stopped early on cancellation or deadline.
    pub cancelled: bool,
}

impl SearchOutcome {
    /// The best complete tour, if the incumbent holds one.
    pub fn tour(&self) -> Option<Tour> {
        self.incumbent.to_tour()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Counters {
    tours_evaluated: u64,
    nodes_expanded: u64,
    nodes_pruned: u64,
}

/// Owns everything one search needs: incumbent, MST cache, path buffer and
/// stop conditions.
///
/// An episode can run several times (the adaptive controller does); the
/// MST cache survives between runs until [`clear_cache`](Self::clear_cache).
/// Independent episodes share nothing.
///
/// # Examples
///
/// ```
/// use u_tsp_oracle::models::Instance;
/// use u_tsp_oracle::search::{Incumbent, NoProgress, SearchConfig, SearchEpisode};
///
/// let instance = Instance::random(7, 42).unwrap();
/// let mut episode = SearchEpisode::new(&instance, None);
/// let outcome = episode
///     .run(Incumbent::unbounded(), &SearchConfig::default(), &mut NoProgress)
///     .unwrap();
/// let tour = outcome.tour().unwrap();
/// assert!(tour.is_permutation_of(7));
/// assert_eq!(tour.order()[0], 0);
/// ```
pub struct SearchEpisode<'a> {
    instance: &'a Instance,
    oracle: MstOracle<'a>,
    incumbent: Incumbent,
    path: Vec<usize>,
    visited: Vec<bool>,
    counters: Counters,
    total_tours: u64,
    total_nodes: u64,
    origin: Instant,
    throttle: ProgressThrottle,
    cancel: Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
    cancelled: bool,
}

impl<'a> SearchEpisode<'a> {
    /// Creates an episode. Progress elapsed time and deadlines are measured
    /// from this moment.
    pub fn new(instance: &'a Instance, cancel: Option<Arc<AtomicBool>>) -> Self {
        let n = instance.size();
        let origin = Instant::now();
        Self {
            instance,
            oracle: MstOracle::new(instance.distances()),
            incumbent: Incumbent::unbounded(),
            path: Vec::with_capacity(n),
            visited: vec![false; n],
            counters: Counters::default(),
            total_tours: 0,
            total_nodes: 0,
            origin,
            throttle: ProgressThrottle::new(SearchConfig::default().progress_interval, origin),
            cancel,
            deadline: None,
            cancelled: false,
        }
    }

    /// Drops every memoized MST weight.
    pub fn clear_cache(&mut self) {
        self.oracle.clear();
    }

    /// Complete tours evaluated over every run of this episode.
    pub fn total_tours_evaluated(&self) -> u64 {
        self.total_tours
    }

    /// Time since the episode was created.
    pub fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }

    /// Searches for the shortest tour strictly below `seed.distance()`.
    ///
    /// Returns `seed` unchanged in the outcome if no such tour exists.
    pub fn run(
        &mut self,
        seed: Incumbent,
        config: &SearchConfig,
        sink: &mut dyn ProgressSink,
    ) -> Result<SearchOutcome> {
        config.validate()?;

        let started = Instant::now();
        let seed_distance = seed.distance();
        self.incumbent = seed;
        self.counters = Counters::default();
        self.cancelled = false;
        self.deadline = config.time_limit.map(|limit| self.origin + limit);
        self.throttle.set_interval(config.progress_interval);

        self.visited.fill(false);
        self.visited[0] = true;
        self.path.clear();
        self.path.push(0);

        self.descend(0.0, sink);

        let incumbent = std::mem::take(&mut self.incumbent);
        let outcome = SearchOutcome {
            improved: incumbent.distance() < seed_distance,
            incumbent,
            tours_evaluated: self.counters.tours_evaluated,
            nodes_expanded: self.counters.nodes_expanded,
            nodes_pruned: self.counters.nodes_pruned,
            mst_cache: self.oracle.stats(),
            elapsed: started.elapsed(),
            cancelled: self.cancelled,
        };
        log::debug!(
            "search: done improved={} best={:.6} tours={} nodes={} pruned={} mst_entries={} mst_hits={} cancelled={}",
            outcome.improved,
            outcome.incumbent.distance(),
            outcome.tours_evaluated,
            outcome.nodes_expanded,
            outcome.nodes_pruned,
            outcome.mst_cache.entries,
            outcome.mst_cache.hits,
            outcome.cancelled
        );
        Ok(outcome)
    }

    fn descend(&mut self, distance: f64, sink: &mut dyn ProgressSink) {
        if self.should_stop() {
            return;
        }
        self.counters.nodes_expanded += 1;
        self.total_nodes += 1;
        if self.total_nodes & CLOCK_CHECK_MASK == 0 {
            self.report_progress(sink);
        }

        let n = self.instance.size();
        let first = self.path[0];
        let last = self.path[self.path.len() - 1];

        if self.path.len() == n {
            let total = distance + self.instance.distance(last, first);
            if total >= self.incumbent.distance {
                self.counters.nodes_pruned += 1;
                return;
            }
            self.counters.tours_evaluated += 1;
            self.total_tours += 1;
            self.report_progress(sink);
            self.incumbent.replace(&self.path, total);
            return;
        }

        let unvisited: Vec<usize> = (0..n).filter(|&v| !self.visited[v]).collect();
        let bound = distance + self.remaining_bound(first, last, &unvisited);
        if bound >= self.incumbent.distance {
            self.counters.nodes_pruned += 1;
            return;
        }

        for next in self.successors(last, &unvisited) {
            let extended = distance + self.instance.distance(last, next);
            if extended >= self.incumbent.distance {
                continue;
            }
            self.visited[next] = true;
            self.path.push(next);
            self.descend(extended, sink);
            self.path.pop();
            self.visited[next] = false;
            if self.cancelled {
                return;
            }
        }
    }

    /// `mst(unvisited)` plus the cheapest edges joining both path ends to
    /// the unvisited set.
    fn remaining_bound(&mut self, first: usize, last: usize, unvisited: &[usize]) -> f64 {
        let mst = self.oracle.weight(unvisited);
        let first_row = self.instance.distances().row(first);
        let last_row = self.instance.distances().row(last);
        let (mut to_first, mut to_last) = (f64::INFINITY, f64::INFINITY);
        for &u in unvisited {
            to_first = to_first.min(first_row[u]);
            to_last = to_last.min(last_row[u]);
        }
        mst + to_first + to_last
    }

    /// Ranked neighbors of `last` first, then the rest by distance.
    fn successors(&self, last: usize, unvisited: &[usize]) -> Vec<usize> {
        let row = self.instance.distances().row(last);
        let mut order: Vec<usize> = self
            .instance
            .neighbors()
            .get(last)
            .iter()
            .copied()
            .filter(|&v| !self.visited[v])
            .collect();
        let mut rest: Vec<usize> = unvisited
            .iter()
            .copied()
            .filter(|v| !order.contains(v))
            .collect();
        rest.sort_by(|&a, &b| row[a].total_cmp(&row[b]));
        order.extend(rest);
        order
    }

    fn should_stop(&mut self) -> bool {
        if self.cancelled {
            return true;
        }
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                self.cancelled = true;
                return true;
            }
        }
        if let Some(deadline) = self.deadline {
            if self.counters.nodes_expanded & CLOCK_CHECK_MASK == 0 && Instant::now() >= deadline
            {
                self.cancelled = true;
                return true;
            }
        }
        false
    }

    fn report_progress(&mut self, sink: &mut dyn ProgressSink) {
        let now = Instant::now();
        if self.throttle.ready(now) {
            sink.report(&Progress {
                tours_evaluated: self.total_tours,
                nodes_expanded: self.total_nodes,
                elapsed: now.duration_since(self.origin),
            });
        }
    }
}
