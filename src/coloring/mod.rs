//! The three-phase parallel coloring engine.
//!
//! 1. [`init`]: every vertex counts the neighbors it has to wait for under
//!    the priority order; that count bounds its color. Vertices of degree at
//!    least [`WORD_BITS`] are heavy, the rest light.
//! 2. [`heavy`]: heavy vertices narrow a `min..=max` color interval until each
//!    settles, using the low candidate word plus a shared block map for
//!    colors past the word.
//! 3. [`light`]: all remaining vertices intersect candidate words with their
//!    successors' until one candidate is left.
//!
//! Each refiner repeats whole passes over its vertices until a pass leaves
//! nothing pending. Vertices are never locked; all sharing is through atomic
//! words that only lose candidates. The result is the first-fit coloring in
//! descending priority order regardless of thread count.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::{
    config::ColoringConfig,
    error::ColoringResult,
    graph::CsrGraph,
    GhostToken,
};

pub mod block_map;
pub mod engine;
pub mod greedy;
pub mod heavy;
pub mod init;
pub mod light;
pub mod priority;
pub mod report;
pub mod state;
pub mod verify;

pub use greedy::{greedy_coloring, greedy_coloring_in_order, priority_greedy};
pub use priority::{priority_order, Priority};
pub use report::ColoringReport;
pub use state::{ColorState, RANGE_LIMIT, WORD_BITS};
pub use verify::verify;

/// A color per vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coloring {
    colors: Vec<u32>,
}

impl Coloring {
    /// Wraps a color array indexed by vertex.
    pub fn from_colors(colors: Vec<u32>) -> Self {
        Self { colors }
    }

    /// Colors indexed by vertex.
    pub fn colors(&self) -> &[u32] {
        &self.colors
    }

    /// Unwraps the color array.
    pub fn into_colors(self) -> Vec<u32> {
        self.colors
    }

    /// Color of `v`.
    pub fn color(&self, v: usize) -> u32 {
        self.colors[v]
    }

    /// `1 + max(color)`, or 0 when there are no vertices.
    pub fn color_count(&self) -> usize {
        self.colors.iter().max().map_or(0, |&c| c as usize + 1)
    }

    /// Vertices per color, for colors `0..color_count()`.
    #[cfg(not(feature = "parallel"))]
    pub fn class_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.color_count()];
        for &c in &self.colors {
            sizes[c as usize] += 1;
        }
        sizes
    }

    /// Vertices per color, for colors `0..color_count()`.
    #[cfg(feature = "parallel")]
    pub fn class_sizes(&self) -> Vec<usize> {
        use rayon::prelude::*;

        let k = self.color_count();
        self.colors
            .par_iter()
            .fold(
                || vec![0usize; k],
                |mut sizes, &c| {
                    sizes[c as usize] += 1;
                    sizes
                },
            )
            .reduce(
                || vec![0usize; k],
                |mut a, b| {
                    for (x, y) in a.iter_mut().zip(b) {
                        *x += y;
                    }
                    a
                },
            )
    }

    /// Sparse histogram: color to vertex count, only non-empty classes.
    pub fn histogram(&self) -> BTreeMap<u32, usize> {
        let mut hist = BTreeMap::new();
        for &c in &self.colors {
            *hist.entry(c).or_insert(0) += 1;
        }
        hist
    }

    /// Checks that this is a proper coloring of `graph`.
    ///
    /// # Errors
    /// See [`verify()`].
    pub fn verify(&self, graph: &CsrGraph) -> ColoringResult<()> {
        verify::verify(graph, &self.colors)
    }
}

/// Counters from one engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PhaseStats {
    /// Vertices handled by the heavy refiner.
    pub heavy_vertices: usize,
    /// Largest successor count.
    pub max_range: usize,
    /// Heavy refiner passes.
    pub heavy_passes: usize,
    /// Light refiner passes.
    pub light_passes: usize,
}

/// Colors `graph` with the parallel engine.
///
/// # Errors
/// - [`ColoringError::InvalidConfig`](crate::ColoringError::InvalidConfig) for zero threads
/// - [`ColoringError::RangeOverflow`](crate::ColoringError::RangeOverflow) if some vertex
///   has too many successors for the packed interval
pub fn color_graph(graph: &CsrGraph, config: &ColoringConfig) -> ColoringResult<Coloring> {
    color_graph_with_stats(graph, config).map(|(coloring, _)| coloring)
}

/// [`color_graph`], also returning the engine counters.
///
/// # Errors
/// Same as [`color_graph`].
pub fn color_graph_with_stats(
    graph: &CsrGraph,
    config: &ColoringConfig,
) -> ColoringResult<(Coloring, PhaseStats)> {
    config.validate()?;
    let threads = config.threads;
    let _span = info_span!(
        "color_graph",
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        threads
    )
    .entered();

    let (colors, stats) = GhostToken::new(|token| -> ColoringResult<_> {
        let state = init::initialize(&token, graph, threads)?;
        let heavy_passes = heavy::refine(&token, &state, graph, threads);
        debug!(heavy_passes, "heavy vertices settled");
        let light_passes = light::refine(&token, &state, graph, threads);
        debug!(light_passes, "light vertices settled");
        let stats = PhaseStats {
            heavy_vertices: state.worklist.len(),
            max_range: state.max_range,
            heavy_passes,
            light_passes,
        };
        Ok((state.into_colors(graph)?, stats))
    })?;

    let coloring = Coloring::from_colors(colors);
    info!(colors = coloring.color_count(), ?stats, "coloring finished");
    Ok((coloring, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::generate;

    #[test]
    fn class_sizes_and_histogram_agree() {
        let c = Coloring::from_colors(vec![0, 2, 2, 0, 0]);
        assert_eq!(c.color_count(), 3);
        assert_eq!(c.class_sizes(), vec![3, 0, 2]);
        assert_eq!(c.histogram().into_iter().collect::<Vec<_>>(), vec![(0, 3), (2, 2)]);
        assert_eq!(Coloring::from_colors(Vec::new()).color_count(), 0);
    }

    #[test]
    fn engine_matches_priority_greedy() {
        let g = generate::random(500, 4000, 21).unwrap();
        let (c, stats) = color_graph_with_stats(&g, &ColoringConfig::with_threads(4)).unwrap();
        assert_eq!(c, priority_greedy(&g));
        assert_eq!(stats.heavy_vertices, 0);
        assert!(stats.light_passes >= 1);
    }

    #[test]
    fn mixed_heavy_and_light() {
        // a dense core of 80 vertices with a sparse ring around it
        let mut edges: Vec<(usize, usize)> =
            (0..80).flat_map(|u| (u + 1..80).map(move |v| (u, v))).collect();
        edges.extend((80..200).map(|v| (v, if v == 199 { 80 } else { v + 1 })));
        edges.extend((80..200).map(|v| (v, v % 80)));
        let g = CsrGraph::from_edges(200, &edges).unwrap();
        let (c, stats) = color_graph_with_stats(&g, &ColoringConfig::with_threads(3)).unwrap();
        assert!(c.verify(&g).is_ok());
        assert_eq!(stats.heavy_vertices, 80);
        assert_eq!(c, priority_greedy(&g));
    }
}
