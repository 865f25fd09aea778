//! Tours: closed Hamiltonian cycles given as vertex orders.

use serde::Serialize;

use crate::distance::DistanceMatrix;

/// A closed tour over the vertices of an instance.
///
/// The last vertex implicitly connects back to the first. `distance` is
/// the length of the closed cycle.
///
/// # Examples
///
/// ```
/// use u_tsp_oracle::distance::DistanceMatrix;
/// use u_tsp_oracle::models::{Point, Tour};
///
/// let points = [
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points);
/// let tour = Tour::from_order(vec![2, 3, 0, 1], &dm);
/// assert!((tour.distance() - 4.0).abs() < 1e-10);
/// assert_eq!(tour.rotated_to(0).order(), &[0, 1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    order: Vec<usize>,
    distance: f64,
}

impl Tour {
    /// Creates a tour with a precomputed length.
    pub fn new(order: Vec<usize>, distance: f64) -> Self {
        Self { order, distance }
    }

    /// Creates a tour and computes its closed length from `distances`.
    pub fn from_order(order: Vec<usize>, distances: &DistanceMatrix) -> Self {
        let distance = distances.tour_length(&order);
        Self { order, distance }
    }

    /// Vertex visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Length of the closed cycle.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Number of vertices in the tour.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the tour visits no vertex.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `true` if the order visits each of `0..n` exactly once.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        if self.order.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &v in &self.order {
            if v >= n || seen[v] {
                return false;
            }
            seen[v] = true;
        }
        true
    }

    /// Returns the same cycle starting at `vertex`.
    ///
    /// The tour is returned unchanged if `vertex` is not part of it.
    pub fn rotated_to(&self, vertex: usize) -> Tour {
        match self.order.iter().position(|&v| v == vertex) {
            Some(pos) => {
                let mut order = self.order.clone();
                order.rotate_left(pos);
                Tour::new(order, self.distance)
            }
            None => self.clone(),
        }
    }
}
