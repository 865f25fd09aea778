//! Per-vertex nearest-neighbor ranking.

use super::DistanceMatrix;

/// Number of neighbors kept per vertex by default.
pub const DEFAULT_NEIGHBOR_COUNT: usize = 10;

/// For each vertex, up to `k` other vertices ordered nearest first.
///
/// Only biases branching and greedy order; correctness never depends on it.
/// Ties in distance are broken by ascending vertex index.
///
/// # Examples
///
/// ```
/// use u_tsp_oracle::models::Point;
/// use u_tsp_oracle::distance::{DistanceMatrix, NeighborRanking};
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(5.0, 0.0),
///     Point::new(1.0, 0.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points);
/// let ranking = NeighborRanking::build(&dm, 10);
/// assert_eq!(ranking.get(0), &[2, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct NeighborRanking {
    lists: Vec<Vec<usize>>,
}

impl NeighborRanking {
    /// Ranks every row of `distances`, keeping at most `k` neighbors
    /// (self excluded).
    ///
    /// # Complexity
    ///
    /// O(n² log n).
    pub fn build(distances: &DistanceMatrix, k: usize) -> Self {
        let n = distances.size();
        let lists = (0..n)
            .map(|i| {
                let row = distances.row(i);
                let mut order: Vec<usize> = (0..n).filter(|&j| j != i).collect();
                order.sort_by(|&a, &b| row[a].total_cmp(&row[b]));
                order.truncate(k);
                order
            })
            .collect();
        Self { lists }
    }

    /// Ranked neighbors of `vertex`, nearest first.
    pub fn get(&self, vertex: usize) -> &[usize] {
        &self.lists[vertex]
    }

    /// Number of ranked vertices.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}
