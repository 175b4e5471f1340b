//! Graph generators for tests, benches and the command line.

use std::collections::HashSet;

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    error::{GraphError, GraphResult},
    graph::CsrGraph,
};

/// A uniformly random simple graph with exactly `edges` undirected edges.
///
/// Endpoint pairs are drawn uniformly and rejected if they form a loop or
/// repeat an existing edge, so the same `seed` always yields the same graph.
///
/// # Errors
/// Fails if `edges` exceeds `nodes * (nodes - 1) / 2`.
pub fn random(nodes: usize, edges: usize, seed: u64) -> GraphResult<CsrGraph> {
    let max = nodes.saturating_mul(nodes.saturating_sub(1)) / 2;
    if edges > max {
        return Err(GraphError::TooManyEdges { requested: edges, max });
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut seen: HashSet<(usize, usize)> = HashSet::with_capacity(edges);
    let mut list = Vec::with_capacity(edges);
    while list.len() < edges {
        let u = rng.gen_range(0..nodes);
        let v = rng.gen_range(0..nodes);
        if u != v && seen.insert((u.min(v), u.max(v))) {
            list.push((u, v));
        }
    }
    Ok(CsrGraph::from_valid_edges(nodes, list))
}

/// The cycle `0 - 1 - ... - (n-1) - 0`. For `n < 3` this degenerates to a
/// path (or nothing).
pub fn cycle(n: usize) -> CsrGraph {
    let edges = (0..n).map(|i| (i, (i + 1) % n)).filter(|&(u, v)| u != v);
    CsrGraph::from_valid_edges(n, edges)
}

/// The complete graph on `n` vertices.
pub fn complete(n: usize) -> CsrGraph {
    let edges = (0..n).flat_map(|u| (u + 1..n).map(move |v| (u, v)));
    CsrGraph::from_valid_edges(n, edges)
}

/// A star: center `0` joined to leaves `1..=leaves`.
pub fn star(leaves: usize) -> CsrGraph {
    CsrGraph::from_valid_edges(leaves + 1, (1..=leaves).map(|leaf| (0, leaf)))
}

/// A `rows x cols` 4-neighbor grid, vertices numbered row-major.
pub fn grid(rows: usize, cols: usize) -> CsrGraph {
    let id = move |r: usize, c: usize| r * cols + c;
    let right = (0..rows).flat_map(move |r| {
        (0..cols.saturating_sub(1)).map(move |c| (id(r, c), id(r, c + 1)))
    });
    let down = (0..rows.saturating_sub(1))
        .flat_map(move |r| (0..cols).map(move |c| (id(r, c), id(r + 1, c))));
    CsrGraph::from_valid_edges(rows * cols, right.chain(down))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_is_reproducible_and_exact() {
        let a = random(100, 300, 7).unwrap();
        let b = random(100, 300, 7).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.edge_count(), 600);
        assert_ne!(a, random(100, 300, 8).unwrap());
    }

    #[test]
    fn random_rejects_impossible_density() {
        assert!(random(4, 6, 1).is_ok());
        assert!(matches!(
            random(4, 7, 1),
            Err(GraphError::TooManyEdges { requested: 7, max: 6 })
        ));
    }

    #[test]
    fn structural_generators() {
        assert_eq!(cycle(5).edge_count(), 10);
        assert_eq!(cycle(2).edge_count(), 2);
        assert_eq!(complete(5).max_degree(), 4);
        let s = star(63);
        assert_eq!(s.degree(0), 63);
        assert!((1..=63).all(|leaf| s.degree(leaf) == 1));
        let g = grid(3, 4);
        assert_eq!(g.node_count(), 12);
        assert_eq!(g.edge_count(), 2 * (3 * 3 + 2 * 4));
        assert_eq!(g.degree(5), 4);
    }
}
