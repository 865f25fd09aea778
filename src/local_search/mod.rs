//! Local search operators for improving tours.
//!
//! - [`two_opt_improve`] — best-improvement 2-opt segment reversal

mod two_opt;

pub use two_opt::{two_opt_delta, two_opt_improve, DEFAULT_TWO_OPT_MAX_ITERATIONS};
