//! SNAP text edge lists.
//!
//! The expected shape is the one SNAP publishes its undirected graphs in:
//!
//! ```text
//! # Directed graph (each unordered pair of nodes is saved twice) ...
//! # Nodes: 4 Edges: 8
//! # FromNodeId	ToNodeId
//! 0	1
//! 1	0
//! ...
//! ```
//!
//! Comment lines start with `#`. The `# Nodes: N Edges: E` header is
//! mandatory and `E` counts data lines, i.e. directed half-edges. Both
//! directions must be present; the result is validated like any other CSR.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::{
    error::{GraphError, GraphResult},
    graph::CsrGraph,
};

/// Reads a SNAP edge list from a file.
///
/// # Errors
/// See [`parse_snap`].
pub fn read_snap(path: impl AsRef<Path>) -> GraphResult<CsrGraph> {
    let file = std::fs::File::open(path)?;
    parse_snap(std::io::BufReader::new(file))
}

/// Parses a SNAP edge list.
///
/// # Errors
/// - no `# Nodes: N Edges: E` line before the first data line
/// - a data line that is not two ids in `0..N`
/// - a data line count different from `E`
/// - the resulting adjacency is not symmetric
pub fn parse_snap(reader: impl BufRead) -> GraphResult<CsrGraph> {
    let mut header: Option<(usize, usize)> = None;
    let mut pairs: Vec<(usize, usize)> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = i + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(comment) = trimmed.strip_prefix('#') {
            if header.is_none() && comment.contains("Nodes:") {
                header = Some(parse_header(comment, lineno)?);
            }
            continue;
        }
        let Some((nodes, edges)) = header else {
            return Err(parse_err(lineno, "could not find line with node and edge counts"));
        };
        let mut fields = trimmed.split_whitespace();
        let (Some(src), Some(dst), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(parse_err(lineno, "expected two vertex ids"));
        };
        let src = parse_id(src, nodes, lineno, "source")?;
        let dst = parse_id(dst, nodes, lineno, "destination")?;
        if pairs.is_empty() {
            pairs.reserve(edges);
        }
        pairs.push((src, dst));
    }

    let Some((nodes, edges)) = header else {
        return Err(parse_err(0, "could not find line with node and edge counts"));
    };
    if pairs.len() != edges {
        return Err(parse_err(
            0,
            &format!("header announces {edges} edges but {} were read", pairs.len()),
        ));
    }

    pairs.sort_unstable();
    let mut offsets = vec![0usize; nodes + 1];
    for &(src, _) in &pairs {
        offsets[src + 1] += 1;
    }
    for v in 0..nodes {
        offsets[v + 1] += offsets[v];
    }
    let nlist = pairs.into_iter().map(|(_, dst)| dst).collect();
    CsrGraph::from_csr_parts(offsets, nlist)
}

/// Writes `graph` as a SNAP edge list, one line per half-edge in CSR order.
///
/// # Errors
/// I/O failures.
pub fn write_snap(graph: &CsrGraph, mut writer: impl Write) -> GraphResult<()> {
    writeln!(writer, "# Undirected graph (each unordered pair of nodes is saved twice)")?;
    writeln!(writer, "# Nodes: {} Edges: {}", graph.node_count(), graph.edge_count())?;
    writeln!(writer, "# FromNodeId\tToNodeId")?;
    for u in 0..graph.node_count() {
        for &v in graph.neighbors(u) {
            writeln!(writer, "{u}\t{v}")?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn parse_header(comment: &str, lineno: usize) -> GraphResult<(usize, usize)> {
    let words: Vec<&str> = comment.split_whitespace().collect();
    match words.as_slice() {
        ["Nodes:", nodes, "Edges:", edges, ..] => {
            let nodes = nodes
                .parse::<usize>()
                .map_err(|_| parse_err(lineno, "failed to parse node count"))?;
            let edges = edges
                .parse::<usize>()
                .map_err(|_| parse_err(lineno, "failed to parse edge count"))?;
            if nodes < 1 {
                return Err(parse_err(lineno, "node count too low"));
            }
            Ok((nodes, edges))
        }
        _ => Err(parse_err(lineno, "failed to parse node and edge counts")),
    }
}

fn parse_id(field: &str, nodes: usize, lineno: usize, what: &str) -> GraphResult<usize> {
    match field.parse::<usize>() {
        Ok(id) if id < nodes => Ok(id),
        Ok(id) => Err(parse_err(lineno, &format!("{what} {id} out of range"))),
        Err(_) => Err(parse_err(lineno, &format!("{what} is not a vertex id: {field:?}"))),
    }
}

fn parse_err(line: usize, message: &str) -> GraphError {
    GraphError::Parse {
        line,
        message: message.to_owned(),
    }
}
