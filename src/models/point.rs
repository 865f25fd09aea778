//! Planar points and seeded point generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Side length of the square that generated points are drawn from.
pub const COORDINATE_RANGE: f64 = 1000.0;

/// An immutable point in the plane.
///
/// # Examples
///
/// ```
/// use u_tsp_oracle::models::Point;
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(3.0, 4.0);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a point at the given coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns `true` if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Generates `n` points uniformly over `[0, 1000)²`.
///
/// The sequence depends only on `seed`: equal seeds always produce equal
/// points.
///
/// # Examples
///
/// ```
/// use u_tsp_oracle::models::generate_points;
///
/// let a = generate_points(5, 42);
/// let b = generate_points(5, 42);
/// assert_eq!(a, b);
/// assert!(a.iter().all(|p| (0.0..1000.0).contains(&p.x())));
/// ```
pub fn generate_points(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let x = rng.random::<f64>() * COORDINATE_RANGE;
            let y = rng.random::<f64>() * COORDINATE_RANGE;
            Point::new(x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_symmetric() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-10);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_generate_deterministic() {
        assert_eq!(generate_points(20, 7), generate_points(20, 7));
    }

    #[test]
    fn test_generate_seed_matters() {
        assert_ne!(generate_points(10, 1), generate_points(10, 2));
    }

    #[test]
    fn test_generate_in_range() {
        let points = generate_points(200, 99);
        assert_eq!(points.len(), 200);
        for p in &points {
            assert!(p.x() >= 0.0 && p.x() < COORDINATE_RANGE);
            assert!(p.y() >= 0.0 && p.y() < COORDINATE_RANGE);
        }
    }

    #[test]
    fn test_generate_empty() {
        assert!(generate_points(0, 42).is_empty());
    }

    #[test]
    fn test_is_finite() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f64::NAN, 2.0).is_finite());
        assert!(!Point::new(1.0, f64::INFINITY).is_finite());
    }
}
