//! Best-improvement 2-opt for closed tours.
//!
//! # Algorithm
//!
//! For every pair of positions `1 <= i < j <= n-2`, compute the change in
//! length from reversing the segment `tour[i..=j]`:
//!
//! ```text
//! delta = d(t[i-1], t[j]) + d(t[i], t[j+1]) - d(t[i-1], t[i]) - d(t[j], t[j+1])
//! ```
//!
//! Each pass applies only the single most negative delta. Passes repeat
//! until no improving reversal exists or the iteration cap is reached.
//! The first and last positions never move.
//!
//! # Complexity
//!
//! O(n²) per pass.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::DistanceMatrix;

/// Iteration cap used by the construction phase.
pub const DEFAULT_TWO_OPT_MAX_ITERATIONS: usize = 1000;

/// Improvements smaller than this are treated as zero.
const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// Applies best-improvement 2-opt to a closed tour.
///
/// Returns the improved order and its closed length. The result is never
/// longer than the input; every applied reversal strictly shortens it.
/// Tours with fewer than 4 vertices are returned unchanged.
///
/// # Examples
///
/// ```
/// use u_tsp_oracle::models::Point;
/// use u_tsp_oracle::distance::DistanceMatrix;
/// use u_tsp_oracle::local_search::two_opt_improve;
///
/// let dm = DistanceMatrix::from_points(&[
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
/// ]);
/// // 0→2→1→3 crosses itself.
/// let (order, dist) = two_opt_improve(&[0, 2, 1, 3], &dm, 1000);
/// assert!((dist - 4.0).abs() < 1e-10);
/// assert_eq!(order, vec![0, 1, 2, 3]);
/// ```
pub fn two_opt_improve(
    tour: &[usize],
    distances: &DistanceMatrix,
    max_iterations: usize,
) -> (Vec<usize>, f64) {
    let mut current = tour.to_vec();
    let n = current.len();
    if n < 4 {
        let dist = distances.tour_length(&current);
        return (current, dist);
    }

    for _ in 0..max_iterations {
        let mut best: Option<(usize, usize, f64)> = None;
        for i in 1..n - 2 {
            for j in (i + 1)..n - 1 {
                let delta = two_opt_delta(&current, distances, i, j);
                if delta < -IMPROVEMENT_EPSILON && best.is_none_or(|(_, _, bd)| delta < bd) {
                    best = Some((i, j, delta));
                }
            }
        }

        match best {
            Some((i, j, _)) => current[i..=j].reverse(),
            None => break,
        }
    }

    let dist = distances.tour_length(&current);
    (current, dist)
}

/// Length change from reversing `tour[i..=j]`, for `1 <= i < j <= n-2`.
///
/// Before: `… t[i-1] - t[i] … t[j] - t[j+1] …`
/// After:  `… t[i-1] - t[j] … t[i] - t[j+1] …`
pub fn two_opt_delta(tour: &[usize], distances: &DistanceMatrix, i: usize, j: usize) -> f64 {
    let (prev, first, last, next) = (tour[i - 1], tour[i], tour[j], tour[j + 1]);
    let old_cost = distances.get(prev, first) + distances.get(last, next);
    let new_cost = distances.get(prev, last) + distances.get(first, next);
    new_cost - old_cost
}
