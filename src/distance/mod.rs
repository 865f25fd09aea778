//! Distance matrix and nearest-neighbor ranking.
//!
//! Both are computed once per instance and read-only afterward.

mod matrix;
mod neighbors;

pub use matrix::DistanceMatrix;
pub use neighbors::{NeighborRanking, DEFAULT_NEIGHBOR_COUNT};
