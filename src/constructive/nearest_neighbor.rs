//! Multi-start nearest-neighbor construction.
//!
//! From a start vertex, repeatedly move to the nearest unvisited vertex.
//! The ranked neighbor list is consulted first; only when every ranked
//! neighbor is already visited does the step fall back to a linear scan.
//!
//! # Complexity
//!
//! O(n·k) per start when ranked neighbors suffice, O(n²) worst case.

use crate::models::{Instance, Tour};

/// Builds a greedy nearest-neighbor tour from `start`.
///
/// # Examples
///
/// ```
/// use u_tsp_oracle::models::{Instance, Point};
/// use u_tsp_oracle::constructive::nearest_neighbor_tour;
///
/// let instance = Instance::from_points(vec![
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 0.0),
///     Point::new(1.0, 0.0),
/// ])
/// .unwrap();
/// let tour = nearest_neighbor_tour(&instance, 0);
/// assert_eq!(tour.order(), &[0, 2, 1]);
/// assert!((tour.distance() - 20.0).abs() < 1e-10);
/// ```
pub fn nearest_neighbor_tour(instance: &Instance, start: usize) -> Tour {
    let n = instance.size();
    let mut visited = vec![false; n];
    visited[start] = true;

    let mut order = Vec::with_capacity(n);
    order.push(start);
    let mut current = start;

    while order.len() < n {
        let Some(next) = nearest_unvisited(instance, current, &visited) else {
            break;
        };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    Tour::from_order(order, instance.distances())
}

/// Runs [`nearest_neighbor_tour`] from vertices `0..starts` and keeps the
/// shortest closed tour. `None` tries every vertex.
///
/// Ties keep the earliest start.
pub fn multi_start_nearest_neighbor(instance: &Instance, max_starts: Option<usize>) -> Tour {
    let n = instance.size();
    let starts = max_starts.map_or(n, |m| m.min(n)).max(1);

    let mut best = nearest_neighbor_tour(instance, 0);
    for start in 1..starts {
        let tour = nearest_neighbor_tour(instance, start);
        if tour.distance() < best.distance() {
            best = tour;
        }
    }
    best
}

fn nearest_unvisited(instance: &Instance, current: usize, visited: &[bool]) -> Option<usize> {
    let row = instance.distances().row(current);

    let mut best: Option<(usize, f64)> = None;
    for &v in instance.neighbors().get(current) {
        if !visited[v] && best.is_none_or(|(_, bd)| row[v] < bd) {
            best = Some((v, row[v]));
        }
    }
    if let Some((v, _)) = best {
        return Some(v);
    }

    let remaining: Vec<usize> = (0..visited.len()).filter(|&v| !visited[v]).collect();
    instance.distances().nearest_neighbor(current, &remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{generate_points, Point};

    fn line() -> Instance {
        Instance::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        ])
        .expect("valid")
    }

    #[test]
    fn test_nn_follows_nearest() {
        let tour = nearest_neighbor_tour(&line(), 0);
        assert_eq!(tour.order(), &[0, 2, 3, 1]);
        assert!((tour.distance() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_nn_other_start() {
        let tour = nearest_neighbor_tour(&line(), 1);
        assert_eq!(tour.order(), &[1, 3, 2, 0]);
        assert!(tour.is_permutation_of(4));
    }

    #[test]
    fn test_nn_falls_back_past_ranking() {
        // 30 points: ranked lists hold 10 entries, so late steps must scan.
        let instance = Instance::from_points(generate_points(30, 12)).expect("valid");
        for start in [0, 7, 29] {
            let tour = nearest_neighbor_tour(&instance, start);
            assert!(tour.is_permutation_of(30));
            assert_eq!(tour.order()[0], start);
        }
    }

    #[test]
    fn test_nn_scan_reaches_outlier() {
        // Eleven clustered points rank only each other; the outlier is
        // reachable from the last cluster vertex through the scan alone.
        let mut points: Vec<Point> = (0..11).map(|i| Point::new(i as f64 * 0.1, 0.0)).collect();
        points.push(Point::new(1000.0, 0.0));
        let instance = Instance::from_points(points).expect("valid");
        assert!(!instance.neighbors().get(10).contains(&11));

        let tour = nearest_neighbor_tour(&instance, 0);
        assert_eq!(tour.order(), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
    }

    #[test]
    fn test_multi_start_picks_shortest() {
        let instance = Instance::from_points(generate_points(15, 3)).expect("valid");
        let best = multi_start_nearest_neighbor(&instance, None);
        for start in 0..15 {
            assert!(best.distance() <= nearest_neighbor_tour(&instance, start).distance());
        }
    }

    #[test]
    fn test_multi_start_capped() {
        let instance = Instance::from_points(generate_points(15, 3)).expect("valid");
        let capped = multi_start_nearest_neighbor(&instance, Some(5));
        let best_of_five = (0..5)
            .map(|s| nearest_neighbor_tour(&instance, s).distance())
            .fold(f64::INFINITY, f64::min);
        assert!((capped.distance() - best_of_five).abs() < 1e-10);
    }

    #[test]
    fn test_cap_larger_than_instance() {
        let tour = multi_start_nearest_neighbor(&line(), Some(50));
        assert!(tour.is_permutation_of(4));
    }
}
