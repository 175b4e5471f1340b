//! A compact, immutable CSR (compressed sparse row) graph.
//!
//! Memory layout:
//! - `offsets`: `Vec<usize>` of length `n + 1` (row offsets, non-decreasing)
//! - `edges`: flat `usize` neighbor ids, row `v` is `edges[offsets[v]..offsets[v + 1]]`
//!
//! Undirected graphs store every edge twice, once per direction. All
//! constructors enforce that symmetry; the coloring engine relies on it.

use core::ops::Range;

use crate::error::{GraphError, GraphResult};

/// An undirected graph in CSR form.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `from_csr_parts` | \(O(n + m \log d)\) | validates structure and symmetry |
/// | `from_edges` | \(O(n + m \log d)\) | symmetrizes, drops loops and duplicates |
/// | `neighbors` | \(O(1)\) | borrowed slice |
/// | `degree` | \(O(1)\) | |
/// | `has_edge` | \(O(d)\) | linear scan of the row |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrGraph {
    offsets: Vec<usize>,
    edges: Vec<usize>,
}

impl CsrGraph {
    /// Builds a graph directly from CSR parts.
    ///
    /// # Errors
    /// - `offsets` is empty, does not start at 0, decreases, or does not end at `edges.len()`
    /// - a neighbor id is out of range, or a vertex lists itself
    /// - some edge `u -> v` has no matching `v -> u` (counted with multiplicity)
    pub fn from_csr_parts(offsets: Vec<usize>, edges: Vec<usize>) -> GraphResult<Self> {
        let first = *offsets.first().ok_or(GraphError::EmptyIndex)?;
        if first != 0 {
            return Err(GraphError::IndexStart(first));
        }
        for (vertex, w) in offsets.windows(2).enumerate() {
            if w[0] > w[1] {
                return Err(GraphError::NonMonotoneIndex {
                    vertex,
                    prev: w[0],
                    next: w[1],
                });
            }
        }
        let index_end = offsets[offsets.len() - 1];
        if index_end != edges.len() {
            return Err(GraphError::EdgeCountMismatch {
                index_end,
                edges: edges.len(),
            });
        }

        let graph = Self { offsets, edges };
        let n = graph.node_count();
        for u in 0..n {
            for &v in graph.neighbors(u) {
                if v >= n {
                    return Err(GraphError::NeighborOutOfRange { from: u, to: v, nodes: n });
                }
                if v == u {
                    return Err(GraphError::SelfLoop(u));
                }
            }
        }
        graph.check_symmetric()?;
        Ok(graph)
    }

    /// Builds a graph from per-vertex neighbor lists.
    ///
    /// # Errors
    /// Same conditions as [`CsrGraph::from_csr_parts`].
    pub fn from_adjacency(adjacency: &[Vec<usize>]) -> GraphResult<Self> {
        let mut offsets = Vec::with_capacity(adjacency.len() + 1);
        offsets.push(0);
        let mut total = 0usize;
        for nbrs in adjacency {
            total += nbrs.len();
            offsets.push(total);
        }
        let edges = adjacency.iter().flatten().copied().collect();
        Self::from_csr_parts(offsets, edges)
    }

    /// Builds an undirected simple graph on `nodes` vertices from a list of
    /// (unordered) edges. Self loops and duplicate edges are dropped; each
    /// remaining edge is stored in both directions with rows sorted by id.
    ///
    /// # Errors
    /// Fails if an endpoint is `>= nodes`.
    pub fn from_edges(nodes: usize, edges: &[(usize, usize)]) -> GraphResult<Self> {
        for &(u, v) in edges {
            let bad = if u >= nodes {
                Some((u, v))
            } else if v >= nodes {
                Some((v, u))
            } else {
                None
            };
            if let Some((to, from)) = bad {
                return Err(GraphError::NeighborOutOfRange { from, to, nodes });
            }
        }
        Ok(Self::from_valid_edges(nodes, edges.iter().copied()))
    }

    /// Infallible core of [`CsrGraph::from_edges`] for endpoints already known to be in range.
    pub(crate) fn from_valid_edges(
        nodes: usize,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let mut adjacency = vec![Vec::new(); nodes];
        for (u, v) in edges {
            if u != v {
                adjacency[u].push(v);
                adjacency[v].push(u);
            }
        }
        let mut offsets = Vec::with_capacity(nodes + 1);
        offsets.push(0);
        let mut flat = Vec::new();
        for row in &mut adjacency {
            row.sort_unstable();
            row.dedup();
            flat.extend_from_slice(row);
            offsets.push(flat.len());
        }
        Self { offsets, edges: flat }
    }

    /// Number of vertices.
    #[inline]
    pub fn node_count(&self) -> usize {
        // `offsets` is length `n + 1` by construction.
        self.offsets.len() - 1
    }

    /// Number of stored half-edges (twice the number of undirected edges).
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The row offsets, length `node_count() + 1`.
    #[inline]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// The flat neighbor list.
    #[inline]
    pub fn edges(&self) -> &[usize] {
        &self.edges
    }

    /// Half-edge positions of `node`'s row.
    #[inline]
    pub fn row(&self, node: usize) -> Range<usize> {
        self.offsets[node]..self.offsets[node + 1]
    }

    /// Neighbors of `node`, in stored order.
    #[inline]
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.edges[self.row(node)]
    }

    /// Degree of `node`.
    #[inline]
    pub fn degree(&self, node: usize) -> usize {
        self.offsets[node + 1] - self.offsets[node]
    }

    /// Largest degree, 0 for an empty graph.
    pub fn max_degree(&self) -> usize {
        (0..self.node_count()).map(|v| self.degree(v)).max().unwrap_or(0)
    }

    /// Checks if `from` lists `to` as a neighbor.
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.neighbors(from).contains(&to)
    }

    /// Whether every half-edge `u -> v` has a matching `v -> u`.
    ///
    /// Always `true` for graphs built by this type's constructors.
    pub fn is_symmetric(&self) -> bool {
        self.check_symmetric().is_ok()
    }

    /// Compares every row with the matching row of the transpose.
    ///
    /// The transpose is built by a counting pass, which leaves its rows sorted
    /// by source id; each original row is sorted into a scratch buffer before
    /// the comparison.
    fn check_symmetric(&self) -> GraphResult<()> {
        let n = self.node_count();
        let mut t_offsets = vec![0usize; n + 1];
        for &v in &self.edges {
            t_offsets[v + 1] += 1;
        }
        for i in 0..n {
            t_offsets[i + 1] += t_offsets[i];
        }
        let mut cursor = t_offsets.clone();
        let mut t_edges = vec![0usize; self.edges.len()];
        for u in 0..n {
            for &v in self.neighbors(u) {
                t_edges[cursor[v]] = u;
                cursor[v] += 1;
            }
        }

        let mut row = Vec::new();
        for u in 0..n {
            row.clear();
            row.extend_from_slice(self.neighbors(u));
            row.sort_unstable();
            let incoming = &t_edges[t_offsets[u]..t_offsets[u + 1]];
            if row.as_slice() != incoming {
                // Find a witness: a target of `u` that does not point back often enough.
                let witness = row
                    .iter()
                    .find(|&&v| {
                        let fwd = row.iter().filter(|&&x| x == v).count();
                        let back = incoming.iter().filter(|&&x| x == v).count();
                        fwd > back
                    })
                    .copied();
                return Err(match witness {
                    Some(v) => GraphError::Asymmetric { from: u, to: v },
                    None => {
                        let v = incoming
                            .iter()
                            .copied()
                            .find(|v| !row.contains(v))
                            .unwrap_or(u);
                        GraphError::Asymmetric { from: v, to: u }
                    }
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_csr_parts_accepts_symmetric_graph() {
        // triangle 0-1-2
        let offsets = vec![0, 2, 4, 6];
        let edges = vec![1, 2, 0, 2, 0, 1];
        let g = CsrGraph::from_csr_parts(offsets, edges).unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 6);
        assert_eq!(g.neighbors(1), &[0, 2]);
        assert_eq!(g.degree(2), 2);
        assert_eq!(g.max_degree(), 2);
        assert!(g.has_edge(2, 0));
    }

    #[test]
    fn from_csr_parts_rejects_bad_structure() {
        assert!(matches!(
            CsrGraph::from_csr_parts(vec![], vec![]),
            Err(GraphError::EmptyIndex)
        ));
        assert!(matches!(
            CsrGraph::from_csr_parts(vec![1, 1], vec![]),
            Err(GraphError::IndexStart(1))
        ));
        assert!(matches!(
            CsrGraph::from_csr_parts(vec![0, 2, 1], vec![1, 0]),
            Err(GraphError::NonMonotoneIndex { vertex: 1, .. })
        ));
        assert!(matches!(
            CsrGraph::from_csr_parts(vec![0, 1, 1], vec![1, 0]),
            Err(GraphError::EdgeCountMismatch { index_end: 1, edges: 2 })
        ));
        assert!(matches!(
            CsrGraph::from_csr_parts(vec![0, 1, 2], vec![5, 0]),
            Err(GraphError::NeighborOutOfRange { from: 0, to: 5, nodes: 2 })
        ));
        assert!(matches!(
            CsrGraph::from_csr_parts(vec![0, 1], vec![0]),
            Err(GraphError::SelfLoop(0))
        ));
    }

    #[test]
    fn from_csr_parts_rejects_one_way_edges() {
        // 0 -> 1 but 1 has no edges
        let err = CsrGraph::from_csr_parts(vec![0, 1, 1], vec![1]).unwrap_err();
        assert!(matches!(err, GraphError::Asymmetric { from: 0, to: 1 }));

        // 1 -> 0 only: the witness is reported from the side that has the edge
        let err = CsrGraph::from_csr_parts(vec![0, 0, 1], vec![0]).unwrap_err();
        assert!(matches!(err, GraphError::Asymmetric { from: 1, to: 0 }));
    }

    #[test]
    fn multiplicity_must_match_in_both_directions() {
        // 0 lists 1 twice, 1 lists 0 once
        let err = CsrGraph::from_adjacency(&[vec![1, 1], vec![0]]).unwrap_err();
        assert!(matches!(err, GraphError::Asymmetric { from: 0, to: 1 }));
        assert!(CsrGraph::from_adjacency(&[vec![1, 1], vec![0, 0]]).is_ok());
    }

    #[test]
    fn symmetry_check_sees_unvalidated_rows() {
        let g = CsrGraph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        assert!(g.is_symmetric());

        let one_way = CsrGraph {
            offsets: vec![0, 1, 1],
            edges: vec![1],
        };
        assert!(!one_way.is_symmetric());
    }

    #[test]
    fn from_edges_symmetrizes_and_dedups() {
        let g = CsrGraph::from_edges(4, &[(0, 1), (1, 0), (2, 2), (3, 1), (0, 1)]).unwrap();
        assert_eq!(g.neighbors(0), &[1]);
        assert_eq!(g.neighbors(1), &[0, 3]);
        assert!(g.neighbors(2).is_empty());
        assert_eq!(g.neighbors(3), &[1]);
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn from_edges_checks_endpoints() {
        let err = CsrGraph::from_edges(2, &[(0, 7)]).unwrap_err();
        assert!(matches!(err, GraphError::NeighborOutOfRange { from: 0, to: 7, nodes: 2 }));
    }

    #[test]
    fn empty_graph() {
        let g = CsrGraph::from_adjacency(&[]).unwrap();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.max_degree(), 0);
    }
}
