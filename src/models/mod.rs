//! Domain model types for the planar TSP.
//!
//! Points are generated once from a seed, a tour is an ordered vertex
//! sequence closing back on its first vertex, and an [`Instance`] bundles
//! the points with their distance matrix and neighbor ranking.

mod instance;
mod point;
mod tour;

pub use instance::{Instance, MIN_VERTICES};
pub use point::{generate_points, Point, COORDINATE_RANGE};
pub use tour::Tour;
