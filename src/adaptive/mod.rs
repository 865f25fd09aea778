//! Adaptive distance-ceiling controller.
//!
//! Repeated bounded branch-and-bound probes that home in on the optimum
//! from below the heuristic baseline. See [`AdaptiveRunner`].

mod config;
mod runner;

pub use config::AdaptiveConfig;
pub use runner::{AdaptiveResult, AdaptiveRunner, RoundRecord, Termination};
