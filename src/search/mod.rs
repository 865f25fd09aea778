//! Exact branch-and-bound tour search.
//!
//! - [`SearchEpisode`] — owned search context: incumbent, MST cache, path buffer
//! - [`BranchAndBound`] — one-shot runs, including the unbounded [`exhaustive`](BranchAndBound::exhaustive) search
//! - [`Incumbent`] — best tour so far, or a bare distance ceiling
//! - [`ProgressSink`] — rate-limited progress callback

mod config;
mod episode;
mod incumbent;
mod progress;
mod runner;

pub use config::{SearchConfig, MIN_PROGRESS_INTERVAL};
pub use episode::{SearchEpisode, SearchOutcome};
pub use incumbent::Incumbent;
pub use progress::{NoProgress, Progress, ProgressSink};
pub use runner::BranchAndBound;
