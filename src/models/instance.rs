//! Problem instance: points, distances and neighbor ranking.

use crate::distance::{DistanceMatrix, NeighborRanking, DEFAULT_NEIGHBOR_COUNT};
use crate::error::{OracleError, Result};

use super::{generate_points, Point};

/// Smallest vertex count for which a tour is meaningful.
pub const MIN_VERTICES: usize = 2;

/// A validated TSP instance.
///
/// Holds the (optional) source points, the symmetric distance matrix and
/// the per-vertex nearest-neighbor ranking. Read-only once built.
///
/// # Examples
///
/// ```
/// use u_tsp_oracle::models::Instance;
///
/// let instance = Instance::random(8, 42).unwrap();
/// assert_eq!(instance.size(), 8);
/// assert_eq!(instance.seed(), Some(42));
/// assert!(Instance::random(1, 42).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    points: Vec<Point>,
    distances: DistanceMatrix,
    neighbors: NeighborRanking,
    seed: Option<u64>,
}

impl Instance {
    /// Generates `n` seeded random points and builds the instance.
    pub fn random(n: usize, seed: u64) -> Result<Self> {
        check_size(n)?;
        let mut instance = Self::from_points(generate_points(n, seed))?;
        instance.seed = Some(seed);
        Ok(instance)
    }

    /// Builds a Euclidean instance from explicit points.
    pub fn from_points(points: Vec<Point>) -> Result<Self> {
        check_size(points.len())?;
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(OracleError::invalid_input(format!(
                "point {i} has non-finite coordinates"
            )));
        }
        let distances = DistanceMatrix::from_points(&points);
        let neighbors = NeighborRanking::build(&distances, DEFAULT_NEIGHBOR_COUNT);
        Ok(Self {
            points,
            distances,
            neighbors,
            seed: None,
        })
    }

    /// Builds an instance from an explicit distance matrix.
    ///
    /// The matrix must be symmetric, finite, non-negative and have a zero
    /// diagonal.
    pub fn from_matrix(distances: DistanceMatrix) -> Result<Self> {
        let n = distances.size();
        check_size(n)?;
        for i in 0..n {
            if distances.get(i, i) != 0.0 {
                return Err(OracleError::invalid_input(format!(
                    "diagonal entry ({i}, {i}) must be zero"
                )));
            }
            for j in (i + 1)..n {
                let d = distances.get(i, j);
                if !d.is_finite() || d < 0.0 {
                    return Err(OracleError::invalid_input(format!(
                        "distance ({i}, {j}) must be finite and non-negative, got {d}"
                    )));
                }
            }
        }
        if !distances.is_symmetric(0.0) {
            return Err(OracleError::invalid_input("distance matrix is not symmetric"));
        }
        let neighbors = NeighborRanking::build(&distances, DEFAULT_NEIGHBOR_COUNT);
        Ok(Self {
            points: Vec::new(),
            distances,
            neighbors,
            seed: None,
        })
    }

    /// Number of vertices.
    pub fn size(&self) -> usize {
        self.distances.size()
    }

    /// Source points. Empty for instances built from a matrix.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    pub fn neighbors(&self) -> &NeighborRanking {
        &self.neighbors
    }

    /// Seed the points were generated from, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Distance between two vertices.
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }
}

fn check_size(n: usize) -> Result<()> {
    if n < MIN_VERTICES {
        return Err(OracleError::invalid_input(format!(
            "need at least {MIN_VERTICES} vertices, got {n}"
        )));
    }
    Ok(())
}
