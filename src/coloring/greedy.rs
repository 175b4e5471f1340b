//! Sequential first-fit baselines.

use crate::{
    coloring::{priority::priority_order, Coloring},
    graph::CsrGraph,
};

const UNCOLORED: u32 = u32::MAX;

/// First-fit coloring in vertex id order.
pub fn greedy_coloring(graph: &CsrGraph) -> Coloring {
    greedy_coloring_in_order(graph, 0..graph.node_count())
}

/// First-fit coloring in descending priority order; colors exactly like the
/// parallel engine.
pub fn priority_greedy(graph: &CsrGraph) -> Coloring {
    greedy_coloring_in_order(graph, priority_order(graph))
}

/// First-fit coloring visiting vertices in `order`: each vertex takes the
/// smallest color unused by its already colored neighbors.
///
/// Vertices `order` never lists are colored afterwards in id order, so the
/// result always covers the whole graph.
pub fn greedy_coloring_in_order(
    graph: &CsrGraph,
    order: impl IntoIterator<Item = usize>,
) -> Coloring {
    let n = graph.node_count();
    let mut colors = vec![UNCOLORED; n];
    // stamp[c] == v + 1 iff color c is taken by a neighbor of v
    let mut stamp = vec![0usize; graph.max_degree() + 1];
    for v in order {
        first_fit(graph, &mut colors, &mut stamp, v);
    }
    for v in 0..n {
        if colors[v] == UNCOLORED {
            first_fit(graph, &mut colors, &mut stamp, v);
        }
    }
    Coloring::from_colors(colors)
}

#[allow(clippy::cast_possible_truncation)]
fn first_fit(graph: &CsrGraph, colors: &mut [u32], stamp: &mut [usize], v: usize) {
    for &u in graph.neighbors(v) {
        let c = colors[u] as usize;
        if colors[u] != UNCOLORED && c < stamp.len() {
            stamp[c] = v + 1;
        }
    }
    let color = stamp.iter().position(|&s| s != v + 1).unwrap_or(stamp.len());
    colors[v] = color as u32;
}
