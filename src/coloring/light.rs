//! Light-vertex refinement.
//!
//! Runs after every heavy vertex has settled. A light vertex `v` with more
//! than one candidate color looks at each still-active successor `n`:
//!
//! - `n`'s candidates are disjoint from `v`'s: `n` cannot take any of them,
//!   so `v` gives up its highest candidate and stops watching `n`.
//! - `n` has settled on a single color: `v` removes it and stops watching `n`.
//!
//! Each dropped successor removes exactly one candidate, so a vertex with `k`
//! active successors always has `k + 1` candidates. Once the lowest candidate
//! is free of every active successor's candidates `v` takes it early.

use core::ops::Range;
use core::sync::atomic::Ordering;

use crate::{
    coloring::{
        engine::EngineState,
        state::{color_bit, lowest_color, ColorState},
    },
    concurrency::run_to_fixpoint,
    graph::CsrGraph,
    GhostToken,
};

/// Refines all vertices to a fixpoint. Returns the number of passes.
pub fn refine<'brand>(
    token: &GhostToken<'brand>,
    state: &EngineState<'brand>,
    graph: &CsrGraph,
    threads: usize,
) -> usize {
    run_to_fixpoint(token, threads, graph.node_count(), |vertices| {
        pass(state, graph, vertices)
    })
}

/// Visits `vertices` once. Returns `true` if any of them is still pending.
pub fn pass(state: &EngineState<'_>, graph: &CsrGraph, vertices: Range<usize>) -> bool {
    let mut again = false;
    for v in vertices {
        again |= step(state, graph, v);
    }
    again
}

#[allow(clippy::cast_possible_truncation)]
fn step(state: &EngineState<'_>, graph: &CsrGraph, v: usize) -> bool {
    let mut pcol = state.candidates[v].load(Ordering::Relaxed);
    if pcol.count_ones() <= 1 {
        return false;
    }
    let neighbors = graph.neighbors(v);
    let mut keep = state.active[v].load(Ordering::Relaxed);
    let mut allnei = 0u64;

    let mut todo = keep;
    while todo != 0 {
        let curr = todo & todo.wrapping_neg();
        todo ^= curr;
        let npcol = state.candidates[neighbors[lowest_color(curr)]].load(Ordering::Relaxed);
        allnei |= npcol;
        if pcol & npcol == 0 {
            pcol &= pcol - 1;
            keep ^= curr;
        } else if npcol.count_ones() == 1 {
            pcol ^= npcol;
            keep ^= curr;
        }
    }

    if keep != 0 {
        let best = color_bit(lowest_color(pcol));
        if best & !allnei != 0 {
            pcol = best;
            keep = 0;
        }
    }

    if keep == 0 {
        state.color[v].store(ColorState::Resolved(lowest_color(pcol) as u32));
    }
    state.active[v].store(keep, Ordering::Relaxed);
    state.candidates[v].store(pcol, Ordering::Relaxed);
    keep != 0
}
