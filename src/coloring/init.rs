//! Priority initialization.
//!
//! One parallel sweep over the vertices. Each vertex counts its successors
//! under the priority order, which bounds its final color, and is classified:
//!
//! - heavy (`degree >= WORD_BITS`): appended to the worklist; its successors
//!   are compacted to the front of its own row of the working neighbor list.
//! - light: the adjacency positions of its successors go into its active mask.
//!
//! Workers own contiguous vertex ranges and the matching contiguous slice of
//! the working neighbor list, so the compaction needs no synchronization.

use core::ops::Range;
use core::sync::atomic::Ordering;

use tracing::{debug, error};

use crate::{
    coloring::{
        block_map::BlockCandidateMap,
        engine::EngineState,
        priority::Priority,
        state::{color_bit, initial_candidates, ColorCell, ColorState, RANGE_LIMIT, WORD_BITS},
    },
    concurrency::{
        atomic::{GhostAtomicU64, GhostAtomicUsize},
        scoped::{partition, with_read_scope},
        GhostWorklist,
    },
    error::{ColoringError, ColoringResult},
    graph::CsrGraph,
    GhostToken,
};

/// Per-vertex outputs written by the sweep.
struct Outputs<'a, 'brand> {
    color: &'a [ColorCell<'brand>],
    candidates: &'a [GhostAtomicU64<'brand>],
    active: &'a [GhostAtomicU64<'brand>],
    worklist: &'a GhostWorklist<'brand>,
    max_range: &'a GhostAtomicUsize<'brand>,
}

/// Builds the engine state for `graph` using `threads` workers.
///
/// # Errors
/// [`ColoringError::RangeOverflow`] if some vertex has `RANGE_LIMIT` or more
/// successors. Nothing is refined in that case.
pub fn initialize<'brand>(
    token: &GhostToken<'brand>,
    graph: &CsrGraph,
    threads: usize,
) -> ColoringResult<EngineState<'brand>> {
    debug_assert!(graph.is_symmetric(), "coloring needs symmetric adjacency");
    let nodes = graph.node_count();
    let color: Vec<ColorCell<'brand>> =
        (0..nodes).map(|_| ColorCell::new(ColorState::Resolved(0))).collect();
    let candidates: Vec<GhostAtomicU64<'brand>> =
        (0..nodes).map(|_| GhostAtomicU64::new(0)).collect();
    let active: Vec<GhostAtomicU64<'brand>> = (0..nodes).map(|_| GhostAtomicU64::new(0)).collect();
    let worklist = GhostWorklist::with_capacity(nodes);
    let max_range = GhostAtomicUsize::new(0);
    let mut successors = vec![0usize; graph.edge_count()];

    let workers = threads.clamp(1, nodes.max(1));
    let out = Outputs {
        color: &color,
        candidates: &candidates,
        active: &active,
        worklist: &worklist,
        max_range: &max_range,
    };
    let out = &out;

    let overflows: Vec<Option<(usize, usize)>> = with_read_scope(token, |scope| {
        let offsets = graph.offsets();
        let mut rest: &mut [usize] = &mut successors;
        let handles: Vec<_> = partition(nodes, workers)
            .map(|vertices| {
                let span = offsets[vertices.end] - offsets[vertices.start];
                let (chunk, tail) = core::mem::take(&mut rest).split_at_mut(span);
                rest = tail;
                scope.spawn(move |_| sweep(graph, vertices, chunk, out))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|payload| std::panic::resume_unwind(payload)))
            .collect()
    });

    let max_range = max_range.into_inner();
    check_range(max_range, overflows.into_iter().flatten().next())?;

    let mut worklist = worklist.into_vec();
    worklist.sort_unstable();
    debug!(heavy = worklist.len(), max_range, workers, "initialized");

    Ok(EngineState {
        color,
        candidates,
        active,
        blocks: BlockCandidateMap::new(graph.edge_count()),
        successors,
        worklist,
        max_range,
    })
}

/// Initializes `vertices`. `chunk` is the working neighbor list from
/// `offsets[vertices.start]` to `offsets[vertices.end]`.
///
/// Returns the first vertex whose successor count overflows, if any.
fn sweep(
    graph: &CsrGraph,
    vertices: Range<usize>,
    chunk: &mut [usize],
    out: &Outputs<'_, '_>,
) -> Option<(usize, usize)> {
    let chunk_start = graph.offsets()[vertices.start];
    let mut overflow = None;
    let mut local_max = 0usize;

    for v in vertices {
        let me = Priority::of(graph, v);
        let neighbors = graph.neighbors(v);
        let heavy = neighbors.len() >= WORD_BITS;
        let row = graph.row(v);
        let compacted = &mut chunk[row.start - chunk_start..row.end - chunk_start];

        let mut range = 0usize;
        let mut mask = 0u64;
        for (pos, &n) in neighbors.iter().enumerate() {
            if me < Priority::of(graph, n) {
                if heavy {
                    compacted[range] = n;
                } else {
                    mask |= color_bit(pos);
                }
                range += 1;
            }
        }

        if heavy {
            out.worklist.push(v);
        } else {
            out.active[v].store(mask, Ordering::Relaxed);
        }
        if range >= RANGE_LIMIT && overflow.is_none() {
            overflow = Some((v, range));
        }
        local_max = local_max.max(range);

        #[allow(clippy::cast_possible_truncation)]
        let packed = range.min(RANGE_LIMIT) as u32;
        out.candidates[v].store(initial_candidates(range), Ordering::Relaxed);
        out.color[v].store(ColorState::pending(0, packed));
    }

    out.max_range.fetch_max(local_max, Ordering::Relaxed);
    overflow
}

/// Fails the run once the largest successor count is known to overflow the
/// packed interval.
fn check_range(max_range: usize, first: Option<(usize, usize)>) -> ColoringResult<()> {
    if max_range < RANGE_LIMIT {
        return Ok(());
    }
    let (vertex, range) = first.unwrap_or((0, max_range));
    error!(vertex, range, limit = RANGE_LIMIT, "too many active neighbors");
    Err(ColoringError::RangeOverflow {
        vertex,
        range,
        limit: RANGE_LIMIT,
    })
}
