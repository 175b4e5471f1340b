//! ECL binary graph files (`.egr`).
//!
//! Layout, all little-endian `i32`:
//!
//! ```text
//! nodes | edges | index[nodes + 1] | nlist[edges] | [eweight[edges]]
//! ```
//!
//! Edge weights are optional. They are validated for length and discarded on
//! read, and never written.

use std::path::Path;

use zerocopy::{
    byteorder::{LittleEndian, I32},
    AsBytes, Ref,
};

use crate::{
    error::{GraphError, GraphResult},
    graph::CsrGraph,
};

type LeI32 = I32<LittleEndian>;

const WORD: usize = core::mem::size_of::<LeI32>();

/// Reads an `.egr` file.
///
/// # Errors
/// I/O failures, layout errors (see [`parse_egr`]) and invalid CSR structure.
pub fn read_egr(path: impl AsRef<Path>) -> GraphResult<CsrGraph> {
    let bytes = std::fs::read(path)?;
    parse_egr(&bytes)
}

/// Writes `graph` as an `.egr` file without weights.
///
/// # Errors
/// I/O failures, or a graph that cannot be expressed with `i32` counts.
pub fn write_egr(graph: &CsrGraph, path: impl AsRef<Path>) -> GraphResult<()> {
    std::fs::write(path, encode_egr(graph)?)?;
    Ok(())
}

/// Decodes an in-memory `.egr` image.
///
/// # Errors
/// - fewer than one node or a negative edge count
/// - any section shorter than its header says
/// - trailing bytes that are not exactly one weight per edge
/// - negative index or neighbor entries, or invalid CSR structure
pub fn parse_egr(bytes: &[u8]) -> GraphResult<CsrGraph> {
    let mut rest = bytes;
    let nodes = take(&mut rest, 1, "nodes")?[0];
    let edges = take(&mut rest, 1, "edges")?[0];
    if nodes < 1 || edges < 0 {
        return Err(GraphError::Format(format!(
            "node or edge count too low (nodes {nodes}, edges {edges})"
        )));
    }
    let (nodes, edges) = (to_usize(nodes, "nodes")?, to_usize(edges, "edges")?);

    let index = take(&mut rest, nodes + 1, "neighbor index list")?
        .into_iter()
        .map(|x| to_usize(x, "index entry"))
        .collect::<GraphResult<Vec<_>>>()?;
    let nlist = take(&mut rest, edges, "neighbor list")?
        .into_iter()
        .map(|x| to_usize(x, "neighbor id"))
        .collect::<GraphResult<Vec<_>>>()?;

    if !rest.is_empty() {
        // weights are optional, but if present there must be one per edge
        take(&mut rest, edges, "edge weights")?;
        if !rest.is_empty() {
            return Err(GraphError::Format(format!(
                "{} trailing bytes after edge weights",
                rest.len()
            )));
        }
    }

    CsrGraph::from_csr_parts(index, nlist)
}

/// Encodes `graph` as an `.egr` image without weights.
///
/// # Errors
/// The format requires at least one node and `i32` counts.
pub fn encode_egr(graph: &CsrGraph) -> GraphResult<Vec<u8>> {
    if graph.node_count() == 0 {
        return Err(GraphError::Format("node count too low (nodes 0)".to_owned()));
    }
    let words = 2 + graph.offsets().len() + graph.edge_count();
    let mut out: Vec<LeI32> = Vec::with_capacity(words);
    out.push(LeI32::new(to_i32(graph.node_count(), "nodes")?));
    out.push(LeI32::new(to_i32(graph.edge_count(), "edges")?));
    for &x in graph.offsets().iter().chain(graph.edges()) {
        out.push(LeI32::new(to_i32(x, "index entry")?));
    }
    Ok(out.as_slice().as_bytes().to_vec())
}

fn take(rest: &mut &[u8], count: usize, what: &str) -> GraphResult<Vec<i32>> {
    let len = count
        .checked_mul(WORD)
        .ok_or_else(|| GraphError::Format(format!("{what} section too large")))?;
    if rest.len() < len {
        return Err(GraphError::Format(format!("failed to read {what}")));
    }
    let (head, tail) = rest.split_at(len);
    *rest = tail;
    let view = Ref::<&[u8], [LeI32]>::new_slice_unaligned(head)
        .ok_or_else(|| GraphError::Format(format!("failed to read {what}")))?;
    Ok(view.iter().map(|x| x.get()).collect())
}

fn to_usize(x: i32, what: &str) -> GraphResult<usize> {
    usize::try_from(x).map_err(|_| GraphError::Format(format!("negative {what}: {x}")))
}

fn to_i32(x: usize, what: &str) -> GraphResult<i32> {
    i32::try_from(x).map_err(|_| GraphError::Format(format!("{what} {x} does not fit in i32")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(values: &[i32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn parses_path_graph_with_and_without_weights() {
        // 0 - 1 - 2
        let body = [3, 4, 0, 1, 3, 4, 1, 0, 2, 1];
        let g = parse_egr(&words(&body)).unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.neighbors(1), &[0, 2]);

        let mut weighted = body.to_vec();
        weighted.extend([7, 7, 7, 7]);
        assert_eq!(parse_egr(&words(&weighted)).unwrap(), g);
    }

    #[test]
    fn encode_matches_reference_layout() {
        let g = CsrGraph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        assert_eq!(encode_egr(&g).unwrap(), words(&[3, 4, 0, 1, 3, 4, 1, 0, 2, 1]));
    }

    #[test]
    fn rejects_truncated_and_padded_files() {
        let body = [3, 4, 0, 1, 3, 4, 1, 0, 2, 1];
        let bytes = words(&body);
        assert!(matches!(parse_egr(&bytes[..bytes.len() - 2]), Err(GraphError::Format(_))));

        let mut partial_weights = body.to_vec();
        partial_weights.push(1);
        assert!(matches!(parse_egr(&words(&partial_weights)), Err(GraphError::Format(_))));

        let mut extra = bytes.clone();
        extra.extend(words(&[1, 1, 1, 1]));
        extra.push(0);
        assert!(matches!(parse_egr(&extra), Err(GraphError::Format(_))));
    }

    #[test]
    fn rejects_bad_counts() {
        assert!(matches!(parse_egr(&words(&[0, 0, 0])), Err(GraphError::Format(_))));
        assert!(matches!(parse_egr(&words(&[1, -1, 0, 0])), Err(GraphError::Format(_))));
        assert!(matches!(parse_egr(&words(&[2, 1, 0, 1, -1, 1])), Err(GraphError::Format(_))));
        let empty = CsrGraph::from_edges(0, &[]).unwrap();
        assert!(matches!(encode_egr(&empty), Err(GraphError::Format(_))));
    }

    #[test]
    fn structural_errors_surface_from_csr_validation() {
        // 0 -> 1 without 1 -> 0
        let bytes = words(&[2, 1, 0, 1, 1, 1]);
        assert!(matches!(parse_egr(&bytes), Err(GraphError::Asymmetric { from: 0, to: 1 })));
    }
}
