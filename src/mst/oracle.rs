//! Memoized MST lower-bound oracle.

use std::collections::HashMap;

use serde::Serialize;

use crate::distance::DistanceMatrix;

use super::mst_weight;

/// Canonical, order-independent key for a vertex subset.
///
/// A bit set over the instance's vertices: permutations and duplicates of
/// the same subset map to the same key.
///
/// # Examples
///
/// ```
/// use u_tsp_oracle::mst::SubsetKey;
///
/// let a = SubsetKey::new(70, &[65, 3, 9]);
/// let b = SubsetKey::new(70, &[9, 65, 3, 3]);
/// assert_eq!(a, b);
/// assert_eq!(a.vertices(), vec![3, 9, 65]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubsetKey(Box<[u64]>);

impl SubsetKey {
    /// Builds the key for `subset` within `0..universe`.
    ///
    /// # Panics
    ///
    /// Panics if a vertex is `>= universe`.
    pub fn new(universe: usize, subset: &[usize]) -> Self {
        let mut words = vec![0u64; universe.div_ceil(64)].into_boxed_slice();
        for &v in subset {
            words[v / 64] |= 1 << (v % 64);
        }
        Self(words)
    }

    /// Vertices in ascending order.
    pub fn vertices(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.len());
        for (w, &word) in self.0.iter().enumerate() {
            let mut bits = word;
            while bits != 0 {
                let b = bits.trailing_zeros() as usize;
                out.push(w * 64 + b);
                bits &= bits - 1;
            }
        }
        out
    }

    /// Number of vertices in the subset.
    pub fn len(&self) -> usize {
        self.0.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }
}

/// Cache statistics for one search episode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MstCacheStats {
    /// Distinct subsets stored.
    pub entries: usize,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that ran Kruskal.
    pub misses: u64,
}

/// MST weights over vertex subsets, memoized by [`SubsetKey`].
///
/// The branch-and-bound engine queries this on every node; sibling
/// branches share remaining-vertex subsets, so most queries are hits.
/// A cached value is always the exact MST weight for its subset.
///
/// # Examples
///
/// ```
/// use u_tsp_oracle::distance::DistanceMatrix;
/// use u_tsp_oracle::models::Point;
/// use u_tsp_oracle::mst::MstOracle;
///
/// let dm = DistanceMatrix::from_points(&[
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(1.0, 1.0),
/// ]);
/// let mut oracle = MstOracle::new(&dm);
/// assert!((oracle.weight(&[2, 0, 1]) - 2.0).abs() < 1e-10);
/// assert!((oracle.weight(&[0, 1, 2]) - 2.0).abs() < 1e-10);
/// assert_eq!(oracle.stats().hits, 1);
/// ```
#[derive(Debug, Clone)]
pub struct MstOracle<'a> {
    distances: &'a DistanceMatrix,
    cache: HashMap<SubsetKey, f64>,
    hits: u64,
    misses: u64,
}

impl<'a> MstOracle<'a> {
    pub fn new(distances: &'a DistanceMatrix) -> Self {
        Self {
            distances,
            cache: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// MST weight over `subset`, in any order, duplicates allowed.
    ///
    /// Returns 0 for subsets of at most one vertex without touching the
    /// cache.
    pub fn weight(&mut self, subset: &[usize]) -> f64 {
        if subset.len() <= 1 {
            return 0.0;
        }
        let key = SubsetKey::new(self.distances.size(), subset);
        self.weight_of(key)
    }

    /// MST weight for an already-built key.
    pub fn weight_of(&mut self, key: SubsetKey) -> f64 {
        if let Some(&w) = self.cache.get(&key) {
            self.hits += 1;
            return w;
        }
        self.misses += 1;
        let w = mst_weight(&key.vertices(), self.distances);
        self.cache.insert(key, w);
        w
    }

    /// Drops every cached subset and resets the counters.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Number of cached subsets.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn stats(&self) -> MstCacheStats {
        MstCacheStats {
            entries: self.cache.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::generate_points;

    #[test]
    fn test_key_canonical() {
        let a = SubsetKey::new(10, &[4, 1, 7]);
        let b = SubsetKey::new(10, &[7, 4, 1, 1]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        assert_eq!(a.vertices(), vec![1, 4, 7]);
    }

    #[test]
    fn test_key_empty() {
        let key = SubsetKey::new(5, &[]);
        assert!(key.is_empty());
        assert!(key.vertices().is_empty());
    }

    #[test]
    fn test_key_word_boundary() {
        let key = SubsetKey::new(130, &[0, 63, 64, 129]);
        assert_eq!(key.vertices(), vec![0, 63, 64, 129]);
    }

    #[test]
    fn test_cache_hit_on_permutation() {
        let dm = DistanceMatrix::from_points(&generate_points(12, 8));
        let mut oracle = MstOracle::new(&dm);
        let first = oracle.weight(&[5, 2, 9, 11, 0]);
        let second = oracle.weight(&[0, 2, 5, 9, 11]);
        let third = oracle.weight(&[11, 9, 5, 2, 0]);
        assert_eq!(first, second);
        assert_eq!(first, third);
        assert_eq!(
            oracle.stats(),
            MstCacheStats {
                entries: 1,
                hits: 2,
                misses: 1
            }
        );
    }

    #[test]
    fn test_matches_uncached() {
        let dm = DistanceMatrix::from_points(&generate_points(15, 21));
        let mut oracle = MstOracle::new(&dm);
        let subset = [14, 3, 7, 1, 10, 6];
        let mut sorted = subset.to_vec();
        sorted.sort_unstable();
        assert_eq!(oracle.weight(&subset), mst_weight(&sorted, &dm));
    }

    #[test]
    fn test_small_subsets_skip_cache() {
        let dm = DistanceMatrix::from_points(&generate_points(4, 1));
        let mut oracle = MstOracle::new(&dm);
        assert_eq!(oracle.weight(&[]), 0.0);
        assert_eq!(oracle.weight(&[3]), 0.0);
        assert!(oracle.is_empty());
    }

    #[test]
    fn test_clear() {
        let dm = DistanceMatrix::from_points(&generate_points(6, 1));
        let mut oracle = MstOracle::new(&dm);
        oracle.weight(&[0, 1, 2]);
        oracle.weight(&[0, 1, 2]);
        oracle.clear();
        assert!(oracle.is_empty());
        assert_eq!(oracle.stats(), MstCacheStats::default());
    }
}
