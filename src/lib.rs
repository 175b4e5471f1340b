//! # `halo-color` - lock-free parallel graph coloring
//!
//! Colors the vertices of a large undirected graph so that no edge joins two
//! equal colors, using few colors and all available cores. The engine is
//! speculative and convergence based: worker threads repeatedly refine
//! per-vertex candidate sets held in atomic words until nothing changes.
//! There are no locks on the hot path and no cleared candidate ever returns.
//!
//! ## Architecture
//!
//! 1. **Graph input** ([`graph`]): an immutable, validated CSR graph plus the
//!    `.egr` binary format, SNAP text edge lists and generators.
//! 2. **Coloring engine** ([`coloring`]): priority initialization, then
//!    heavy-vertex interval refinement, then light-vertex bitmask refinement.
//! 3. **Concurrency** ([`concurrency`]): branded atomics, scoped workers over
//!    contiguous index ranges and a barrier-driven fixpoint loop.
//!
//! All shared state of one run is branded with the lifetime of a single
//! [`GhostToken`] scope, so the arrays of two runs cannot be mixed and only
//! the run's own workers can enter its pass barrier.
//!
//! ## Guarantees
//!
//! - The result is a proper coloring with at most `max_degree + 1` colors.
//! - The result is deterministic: it equals sequential first-fit in
//!   descending `(degree, hash(id), id)` order for any thread count.
//!
//! ## Example
//!
//! ```rust
//! use halo_color::{color_graph, ColoringConfig, CsrGraph};
//!
//! // a 5-cycle needs three colors
//! let graph = CsrGraph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]).unwrap();
//! let coloring = color_graph(&graph, &ColoringConfig::with_threads(2)).unwrap();
//!
//! assert_eq!(coloring.color_count(), 3);
//! assert!(coloring.verify(&graph).is_ok());
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod coloring;
pub mod concurrency;
pub mod config;
pub mod error;
pub mod graph;
pub mod token;

pub use coloring::{
    color_graph, color_graph_with_stats, greedy_coloring, Coloring, ColoringReport, PhaseStats,
};
pub use config::ColoringConfig;
pub use error::{ColoringError, ColoringResult, GraphError, GraphResult};
pub use graph::CsrGraph;
pub use token::GhostToken;

// Compile-time layout checks.
const _: () = {
    use core::mem;

    use crate::coloring::state::ColorCell;
    use crate::concurrency::atomic::GhostAtomicU64;

    // Tokens are ZSTs.
    assert!(mem::size_of::<GhostToken<'static>>() == 0);

    // A color cell is exactly one atomic word.
    assert!(mem::size_of::<ColorCell<'static>>() == mem::size_of::<u64>());
    assert!(mem::size_of::<GhostAtomicU64<'static>>() == mem::size_of::<u64>());

    // The packed interval needs two halves of a word.
    assert!(coloring::RANGE_LIMIT == u32::MAX as usize);
};
