//! Shared state of one coloring run.

use core::sync::atomic::Ordering;

use crate::{
    coloring::{
        block_map::BlockCandidateMap,
        state::{ColorCell, ColorState},
    },
    concurrency::atomic::GhostAtomicU64,
    error::{ColoringError, ColoringResult},
    graph::CsrGraph,
};

/// Everything the refiners share, branded with the run's token.
///
/// Built once by [`initialize`](crate::coloring::init::initialize); afterwards
/// the per-vertex arrays are only touched through atomic loads, stores and
/// bit-clears, while `successors` and `worklist` are read-only.
pub struct EngineState<'brand> {
    /// One color cell per vertex.
    pub color: Vec<ColorCell<'brand>>,
    /// Candidate mask per vertex for colors `0..WORD_BITS`.
    pub candidates: Vec<GhostAtomicU64<'brand>>,
    /// Active successor positions of light vertices; zero for heavy ones.
    pub active: Vec<GhostAtomicU64<'brand>>,
    /// Candidates beyond the word width, owned by heavy vertices.
    pub blocks: BlockCandidateMap<'brand>,
    /// Heavy vertices' successors, compacted to the front of each row.
    pub successors: Vec<usize>,
    /// Heavy vertices, ascending.
    pub worklist: Vec<usize>,
    /// Largest successor count of any vertex.
    pub max_range: usize,
}

impl<'brand> EngineState<'brand> {
    /// Current state of `v`.
    #[inline]
    pub fn state(&self, v: usize) -> ColorState {
        self.color[v].load()
    }

    /// Current candidate mask of `v`.
    #[inline]
    pub fn candidate_mask(&self, v: usize) -> u64 {
        self.candidates[v].load(Ordering::Relaxed)
    }

    /// Number of vertices not yet resolved.
    pub fn pending_count(&self) -> usize {
        self.color.iter().filter(|c| c.load().color().is_none()).count()
    }

    /// Copies the final colors out.
    ///
    /// # Errors
    /// [`ColoringError::Unresolved`] for the first vertex still pending.
    pub fn into_colors(self, graph: &CsrGraph) -> ColoringResult<Vec<u32>> {
        self.color
            .into_iter()
            .enumerate()
            .map(|(vertex, cell)| match cell.into_state() {
                ColorState::Resolved(c) => Ok(c),
                ColorState::Pending { .. } => Err(ColoringError::Unresolved {
                    vertex,
                    degree: graph.degree(vertex),
                }),
            })
            .collect()
    }
}
