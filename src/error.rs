//! Error types.
//!
//! Nothing in the engine retries: every operation either succeeds, is an
//! atomic with no failure mode, or fails the whole run with one of these.

use thiserror::Error;

/// Errors raised while building, reading or writing a graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The index array must have `node_count + 1` entries.
    #[error("index array is empty; it must have node_count + 1 entries")]
    EmptyIndex,
    /// The index array must start at zero.
    #[error("index array must start at 0, found {0}")]
    IndexStart(usize),
    /// The index array decreases somewhere.
    #[error("index array decreases at vertex {vertex}: {prev} > {next}")]
    NonMonotoneIndex {
        /// Vertex whose range is inverted.
        vertex: usize,
        /// `index[vertex]`.
        prev: usize,
        /// `index[vertex + 1]`.
        next: usize,
    },
    /// The last index entry does not match the neighbor list length.
    #[error("index array ends at {index_end} but the neighbor list has {edges} entries")]
    EdgeCountMismatch {
        /// `index[node_count]`.
        index_end: usize,
        /// Neighbor list length.
        edges: usize,
    },
    /// A neighbor id is not a vertex of the graph.
    #[error("edge {from} -> {to} points outside the graph of {nodes} vertices")]
    NeighborOutOfRange {
        /// Source vertex.
        from: usize,
        /// Offending neighbor id.
        to: usize,
        /// Vertex count.
        nodes: usize,
    },
    /// A vertex lists itself as a neighbor and can never be colored properly.
    #[error("vertex {0} has a self loop")]
    SelfLoop(usize),
    /// More edges were requested than a simple graph can hold.
    #[error("{requested} edges requested but a simple graph on these vertices has at most {max}")]
    TooManyEdges {
        /// Requested undirected edges.
        requested: usize,
        /// Maximum possible.
        max: usize,
    },
    /// The adjacency is not symmetric.
    #[error("edge {from} -> {to} has no reverse edge")]
    Asymmetric {
        /// Source vertex.
        from: usize,
        /// Target vertex.
        to: usize,
    },
    /// A binary graph file ended early or had a bad layout.
    #[error("malformed graph file: {0}")]
    Format(String),
    /// A text edge list could not be parsed.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised by a coloring run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColoringError {
    /// The configuration cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A vertex has more successors than the packed interval can express.
    #[error("too many active neighbors: vertex {vertex} has {range} successors (limit {limit})")]
    RangeOverflow {
        /// First vertex found at the maximum.
        vertex: usize,
        /// Its successor count.
        range: usize,
        /// Exclusive limit of the encoding.
        limit: usize,
    },
    /// A vertex was left without a final color.
    #[error("found unprocessed vertex {vertex} (degree {degree})")]
    Unresolved {
        /// The vertex.
        vertex: usize,
        /// Its degree.
        degree: usize,
    },
    /// Two adjacent vertices share a color.
    #[error("found adjacent vertices {u} and {v} with same color {color}")]
    Conflict {
        /// One endpoint.
        u: usize,
        /// The other endpoint.
        v: usize,
        /// The shared color.
        color: u32,
    },
    /// The color array does not match the graph.
    #[error("coloring has {colors} entries but the graph has {nodes} vertices")]
    LengthMismatch {
        /// Entries in the color array.
        colors: usize,
        /// Vertices in the graph.
        nodes: usize,
    },
}

/// Result alias for graph construction and I/O.
pub type GraphResult<T> = Result<T, GraphError>;

/// Result alias for coloring runs.
pub type ColoringResult<T> = Result<T, ColoringError>;
