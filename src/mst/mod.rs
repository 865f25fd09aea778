//! Minimum spanning tree lower bounds.
//!
//! - [`UnionFind`] — disjoint sets with union by rank and path compression
//! - [`mst_weight`] — Kruskal's algorithm over an induced subset, O(k² log k)
//! - [`MstOracle`] — memoized `mst_weight` keyed by canonical [`SubsetKey`]
//!
//! The MST over the unvisited vertices never exceeds the cost of any
//! Hamiltonian path through them, which makes it an admissible bound for
//! the branch-and-bound search.

mod kruskal;
mod oracle;
mod union_find;

pub use kruskal::{mst_weight, Edge};
pub use oracle::{MstCacheStats, MstOracle, SubsetKey};
pub use union_find::UnionFind;
