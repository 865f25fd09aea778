//! Initial incumbent: multi-start greedy, optionally polished by 2-opt.

use crate::error::Result;
use crate::local_search::two_opt_improve;
use crate::models::{Instance, Tour};

use super::{multi_start_nearest_neighbor, ConstructionConfig};

/// Builds the heuristic tour that seeds the exact search.
///
/// The result is rotated to start at vertex 0.
///
/// # Examples
///
/// ```
/// use u_tsp_oracle::models::Instance;
/// use u_tsp_oracle::constructive::{build_initial_tour, ConstructionConfig};
///
/// let instance = Instance::random(20, 42).unwrap();
/// let tour = build_initial_tour(&instance, &ConstructionConfig::default()).unwrap();
/// assert!(tour.is_permutation_of(20));
/// assert_eq!(tour.order()[0], 0);
/// ```
pub fn build_initial_tour(instance: &Instance, config: &ConstructionConfig) -> Result<Tour> {
    config.validate()?;

    let greedy = multi_start_nearest_neighbor(instance, config.max_starts);
    log::debug!(
        "construct: greedy n={} starts={:?} length={:.6}",
        instance.size(),
        config.max_starts,
        greedy.distance()
    );

    let tour = if config.two_opt {
        let (order, distance) = two_opt_improve(
            greedy.order(),
            instance.distances(),
            config.two_opt_max_iterations,
        );
        log::debug!(
            "construct: 2-opt length={:.6} gain={:.6}",
            distance,
            greedy.distance() - distance
        );
        Tour::new(order, distance)
    } else {
        greedy
    };

    Ok(tour.rotated_to(0))
}
