//! Kruskal's minimum spanning tree over an induced vertex subset.

use crate::distance::DistanceMatrix;

use super::UnionFind;

/// A weighted edge between two vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub weight: f64,
    pub a: usize,
    pub b: usize,
}

/// Weight of the minimum spanning tree over the complete graph induced by
/// `vertices`.
///
/// `vertices` must be sorted and free of duplicates; [`MstOracle`] takes
/// care of that. Returns 0 for one vertex or none.
///
/// Edges are enumerated in ascending `(i, j)` position order and
/// stable-sorted by weight, so equal inputs always accept the same edges.
///
/// # Complexity
///
/// O(k² log k) for `k = vertices.len()`.
///
/// [`MstOracle`]: super::MstOracle
pub fn mst_weight(vertices: &[usize], distances: &DistanceMatrix) -> f64 {
    let k = vertices.len();
    if k <= 1 {
        return 0.0;
    }

    // Endpoints are positions into `vertices`, so union-find stays dense.
    let mut edges = Vec::with_capacity(k * (k - 1) / 2);
    for i in 0..k {
        for j in (i + 1)..k {
            edges.push(Edge {
                weight: distances.get(vertices[i], vertices[j]),
                a: i,
                b: j,
            });
        }
    }
    edges.sort_by(|x, y| x.weight.total_cmp(&y.weight));

    let mut uf = UnionFind::new(k);
    let mut total = 0.0;
    let mut accepted = 0;
    for edge in &edges {
        if accepted == k - 1 {
            break;
        }
        if uf.union(edge.a, edge.b) {
            total += edge.weight;
            accepted += 1;
        }
    }
    total
}
