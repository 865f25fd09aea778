//! Property tests over random small instances.

use proptest::prelude::*;

use u_tsp_oracle::adaptive::{AdaptiveConfig, AdaptiveRunner};
use u_tsp_oracle::constructive::{build_initial_tour, ConstructionConfig};
use u_tsp_oracle::local_search::two_opt_improve;
use u_tsp_oracle::models::{Instance, Point};
use u_tsp_oracle::mst::MstOracle;
use u_tsp_oracle::search::{BranchAndBound, Incumbent, SearchConfig};
use u_tsp_oracle::solver::{self, Oracle, OracleConfig};

fn points(min: usize, max: usize) -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((0.0..1000.0f64, 0.0..1000.0f64), min..=max)
        .prop_map(|coords| coords.into_iter().map(|(x, y)| Point::new(x, y)).collect())
}

fn brute_force(instance: &Instance) -> f64 {
    fn walk(instance: &Instance, order: &mut Vec<usize>, used: &mut [bool], best: &mut f64) {
        if order.len() == used.len() {
            *best = best.min(instance.distances().tour_length(order));
            return;
        }
        for v in 1..used.len() {
            if !used[v] {
                used[v] = true;
                order.push(v);
                walk(instance, order, used, best);
                order.pop();
                used[v] = false;
            }
        }
    }

    let n = instance.size();
    let mut used = vec![false; n];
    used[0] = true;
    let mut best = f64::INFINITY;
    walk(instance, &mut vec![0], &mut used, &mut best);
    best
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn adaptive_matches_brute_force(pts in points(3, 8)) {
        let instance = Instance::from_points(pts).expect("finite points");
        let result = Oracle::default().solve(&instance).expect("default config");
        prop_assert!((result.best.distance() - brute_force(&instance)).abs() < 1e-6);
        prop_assert!(result.best.is_permutation_of(instance.size()));
        prop_assert_eq!(result.best.order()[0], 0);
    }

    #[test]
    fn direct_never_worse_than_heuristic(pts in points(3, 9)) {
        let instance = Instance::from_points(pts).expect("finite points");
        let config = OracleConfig::default().with_strategy(solver::Strategy::Direct);
        let result = Oracle::new(config).solve(&instance).expect("valid config");
        prop_assert!(result.best.distance() <= result.heuristic.distance() + 1e-9);
        prop_assert!(result.improvement() >= -1e-9);
    }

    #[test]
    fn seeded_search_returns_valid_tour(pts in points(3, 9)) {
        let instance = Instance::from_points(pts).expect("finite points");
        let seed = build_initial_tour(&instance, &ConstructionConfig::default()).expect("valid");
        let outcome = BranchAndBound::run(
            &instance,
            Incumbent::from_tour(&seed),
            &SearchConfig::default(),
        )
        .expect("valid");
        let tour = outcome.tour().expect("seeded search keeps a tour");
        prop_assert!(tour.is_permutation_of(instance.size()));
        let recomputed = instance.distances().tour_length(tour.order());
        prop_assert!((recomputed - tour.distance()).abs() < 1e-6);
    }

    #[test]
    fn mst_weight_ignores_vertex_order(
        pts in points(2, 12),
        shuffle in any::<proptest::sample::Index>(),
    ) {
        let instance = Instance::from_points(pts).expect("finite points");
        let n = instance.size();
        let sorted: Vec<usize> = (0..n).collect();
        let mut rotated = sorted.clone();
        rotated.rotate_left(shuffle.index(n));
        rotated.reverse();

        let mut a = MstOracle::new(instance.distances());
        let mut b = MstOracle::new(instance.distances());
        prop_assert!((a.weight(&sorted) - b.weight(&rotated)).abs() < 1e-9);
    }

    #[test]
    fn two_opt_never_lengthens(pts in points(4, 30)) {
        let instance = Instance::from_points(pts).expect("finite points");
        let order: Vec<usize> = (0..instance.size()).collect();
        let before = instance.distances().tour_length(&order);
        let (improved, after) = two_opt_improve(&order, instance.distances(), 1000);
        prop_assert!(after <= before + 1e-9);
        let mut check = improved.clone();
        check.sort_unstable();
        prop_assert_eq!(check, order);
    }

    #[test]
    fn solve_is_deterministic(n in 3usize..10, seed in any::<u64>()) {
        let instance = Instance::random(n, seed).expect("valid size");
        let first = Oracle::default().solve(&instance).expect("valid");
        let second = Oracle::default().solve(&instance).expect("valid");
        prop_assert_eq!(first.best.order(), second.best.order());
        prop_assert_eq!(first.tours_evaluated, second.tours_evaluated);
        prop_assert_eq!(first.rounds.len(), second.rounds.len());
    }

    #[test]
    fn adaptive_ratio_does_not_change_answer(pts in points(3, 7), ratio in 0.5f64..0.99) {
        let instance = Instance::from_points(pts).expect("finite points");
        let baseline = build_initial_tour(&instance, &ConstructionConfig::default()).expect("valid");
        let config = AdaptiveConfig::default().with_initial_ratio(ratio);
        let result = AdaptiveRunner::run(&instance, &baseline, &config, &SearchConfig::default())
            .expect("valid");
        prop_assert!((result.tour.distance() - brute_force(&instance)).abs() < 1e-6);
    }
}
