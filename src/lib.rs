//! # u-tsp-oracle
//!
//! Exact Euclidean TSP oracle for small instances. A cheap heuristic tour
//! (multi-start nearest neighbor plus 2-opt) seeds a depth-first
//! branch-and-bound whose lower bound is a memoized minimum spanning tree
//! over the unvisited vertices. An adaptive controller probes with
//! ceilings below the heuristic length to tighten pruning early.
//!
//! ## Modules
//!
//! - [`models`] — Points, instances and tours
//! - [`distance`] — Distance matrix and ranked neighbor lists
//! - [`mst`] — Union-find, Kruskal and the memoized MST bound
//! - [`constructive`] — Nearest-neighbor construction and the initial tour
//! - [`local_search`] — 2-opt improvement
//! - [`search`] — Branch-and-bound episodes, incumbents and progress reporting
//! - [`adaptive`] — Ceiling controller over repeated search rounds
//! - [`solver`] — End-to-end solve with a chosen strategy
//! - [`report`] — Result file and display helpers
//!
//! ## Example
//!
//! ```
//! use u_tsp_oracle::models::Instance;
//! use u_tsp_oracle::solver::Oracle;
//!
//! let instance = Instance::random(8, 42).unwrap();
//! let result = Oracle::default().solve(&instance).unwrap();
//! assert!(result.best.is_permutation_of(8));
//! assert!(result.best.distance() <= result.heuristic.distance() + 1e-9);
//! ```

pub mod adaptive;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod local_search;
pub mod models;
pub mod mst;
pub mod report;
pub mod search;
pub mod solver;

pub use error::{OracleError, Result};
