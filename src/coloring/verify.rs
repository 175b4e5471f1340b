//! Post-condition checks on a finished coloring.

use crate::{
    error::{ColoringError, ColoringResult},
    graph::CsrGraph,
};

/// Checks that `colors` assigns one color per vertex and that no edge joins
/// two equal colors. Reports the lowest offending vertex.
///
/// # Errors
/// [`ColoringError::LengthMismatch`] or [`ColoringError::Conflict`].
pub fn verify(graph: &CsrGraph, colors: &[u32]) -> ColoringResult<()> {
    if colors.len() != graph.node_count() {
        return Err(ColoringError::LengthMismatch {
            colors: colors.len(),
            nodes: graph.node_count(),
        });
    }
    match first_conflict(graph, colors) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn conflict_at(graph: &CsrGraph, colors: &[u32], u: usize) -> Option<ColoringError> {
    let color = colors[u];
    graph
        .neighbors(u)
        .iter()
        .find(|&&v| colors[v] == color)
        .map(|&v| ColoringError::Conflict { u, v, color })
}

#[cfg(not(feature = "parallel"))]
fn first_conflict(graph: &CsrGraph, colors: &[u32]) -> Option<ColoringError> {
    (0..graph.node_count()).find_map(|u| conflict_at(graph, colors, u))
}

#[cfg(feature = "parallel")]
fn first_conflict(graph: &CsrGraph, colors: &[u32]) -> Option<ColoringError> {
    use rayon::prelude::*;

    (0..graph.node_count())
        .into_par_iter()
        .find_map_first(|u| conflict_at(graph, colors, u))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::generate;

    #[test]
    fn accepts_a_proper_coloring() {
        let g = generate::cycle(4);
        assert_eq!(verify(&g, &[0, 1, 0, 1]), Ok(()));
    }

    #[test]
    fn reports_the_first_conflict() {
        let g = generate::cycle(4);
        assert_eq!(
            verify(&g, &[0, 1, 1, 0]),
            Err(ColoringError::Conflict { u: 0, v: 3, color: 0 })
        );
    }

    #[test]
    fn rejects_wrong_length() {
        let g = generate::cycle(4);
        assert_eq!(
            verify(&g, &[0, 1, 0]),
            Err(ColoringError::LengthMismatch { colors: 3, nodes: 4 })
        );
    }

    #[test]
    fn verification_is_idempotent() {
        let g = generate::complete(5);
        let colors = [0, 1, 2, 3, 4];
        assert_eq!(verify(&g, &colors), verify(&g, &colors));
        assert!(verify(&g, &colors).is_ok());
    }
}
