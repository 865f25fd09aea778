//! Constructive heuristics for the initial incumbent.
//!
//! - [`nearest_neighbor_tour`] — greedy nearest-neighbor from one start, O(n²)
//! - [`multi_start_nearest_neighbor`] — best greedy tour over several starts
//! - [`build_initial_tour`] — multi-start greedy + optional 2-opt, per [`ConstructionConfig`]

mod config;
mod initial;
mod nearest_neighbor;

pub use config::ConstructionConfig;
pub use initial::build_initial_tour;
pub use nearest_neighbor::{multi_start_nearest_neighbor, nearest_neighbor_tour};
