//! Heavy-vertex refinement.
//!
//! A pending heavy vertex knows its color lies in `min..=max`, where `max` is
//! its successor count. Each visit narrows the interval from below: colors
//! already taken by resolved successors are removed from the low candidate
//! word (colors below `WORD_BITS`) or claimed in the block map (colors above),
//! and `min` jumps to the lowest color still free. A vertex settles on `min`
//! once no pending successor can still land on `min` or below.

use core::ops::Range;
use core::sync::atomic::Ordering;

use crate::{
    coloring::{
        engine::EngineState,
        state::{color_bit, lowest_color, ColorState, WORD_BITS},
    },
    concurrency::run_to_fixpoint,
    graph::CsrGraph,
    GhostToken,
};

/// Refines the heavy worklist to a fixpoint. Returns the number of passes.
pub fn refine<'brand>(
    token: &GhostToken<'brand>,
    state: &EngineState<'brand>,
    graph: &CsrGraph,
    threads: usize,
) -> usize {
    run_to_fixpoint(token, threads, state.worklist.len(), |slice| {
        pass(state, graph, slice)
    })
}

/// Visits `state.worklist[slice]` once. Returns `true` if any vertex there is
/// still pending afterwards.
pub fn pass(state: &EngineState<'_>, graph: &CsrGraph, slice: Range<usize>) -> bool {
    let mut again = false;
    for &v in &state.worklist[slice] {
        again |= step(state, graph, v);
    }
    again
}

/// One refinement step of heavy vertex `v`. Returns `true` if `v` is still
/// pending.
#[allow(clippy::cast_possible_truncation)]
fn step(state: &EngineState<'_>, graph: &CsrGraph, v: usize) -> bool {
    let ColorState::Pending { min, range } = state.state(v) else {
        return false;
    };
    let (min, max) = (min as usize, min as usize + range as usize);
    let beg = graph.row(v).start;
    let base = beg / WORD_BITS;
    let mut pcol = state.candidates[v].load(Ordering::Relaxed);

    let mut done = true;
    let mut shortcut = true;
    for &n in &state.successors[beg..beg + max] {
        match state.state(n) {
            ColorState::Resolved(c) => {
                let c = c as usize;
                if c < WORD_BITS {
                    pcol &= !color_bit(c);
                } else if (min..max).contains(&c) {
                    state.blocks.claim(base, c);
                }
            }
            ColorState::Pending { min: nmin, range: nrange } => {
                done = false;
                let (nmin, nmax) = (nmin as usize, nmin as usize + nrange as usize);
                if nmin <= min && nmax >= min {
                    shortcut = false;
                }
            }
        }
    }

    let next = if pcol != 0 {
        lowest_color(pcol)
    } else {
        state.blocks.first_available(base, (min / WORD_BITS).max(1))
    };
    if next != min {
        shortcut = false;
    }
    let remaining = max.saturating_sub(next);

    if shortcut || done || remaining == 0 {
        let settled = if next < WORD_BITS { color_bit(next) } else { 0 };
        state.candidates[v].store(settled, Ordering::Relaxed);
        state.color[v].store(ColorState::Resolved(next as u32));
        false
    } else {
        state.candidates[v].store(pcol, Ordering::Relaxed);
        state.color[v].store(ColorState::pending(next as u32, remaining as u32));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{coloring::init::initialize, graph::generate};

    fn interval(state: ColorState) -> (u32, u32) {
        match state {
            ColorState::Resolved(c) => (c, c),
            ColorState::Pending { min, range } => (min, min + range),
        }
    }

    #[test]
    fn intervals_only_shrink_from_below() {
        let g = generate::complete(WORD_BITS + 6);
        GhostToken::new(|token| {
            let state = initialize(&token, &g, 1).unwrap();
            let len = state.worklist.len();
            let mut passes = 0;
            loop {
                let before: Vec<_> =
                    (0..g.node_count()).map(|v| interval(state.state(v))).collect();
                let again = pass(&state, &g, 0..len);
                passes += 1;
                for (v, &(lo, hi)) in before.iter().enumerate() {
                    let (lo2, hi2) = interval(state.state(v));
                    assert!(lo2 >= lo && hi2 <= hi, "vertex {v}: {lo}..={hi} became {lo2}..={hi2}");
                }
                if !again {
                    break;
                }
                assert!(passes < 1000, "heavy refinement does not converge");
            }
            assert_eq!(state.pending_count(), 0);
        });
    }

    #[test]
    fn complete_graph_uses_colors_past_the_first_word() {
        let g = generate::complete(WORD_BITS + 6);
        GhostToken::new(|token| {
            let state = initialize(&token, &g, 4).unwrap();
            let passes = refine(&token, &state, &g, 4);
            assert!(passes >= 1);
            let mut colors = state.into_colors(&g).unwrap();
            colors.sort_unstable();
            assert_eq!(colors, (0..70).collect::<Vec<u32>>());
        });
    }

    #[test]
    fn settled_high_colors_leave_no_low_candidate() {
        let g = generate::complete(WORD_BITS + 2);
        GhostToken::new(|token| {
            let state = initialize(&token, &g, 2).unwrap();
            refine(&token, &state, &g, 2);
            for v in 0..g.node_count() {
                match state.state(v) {
                    ColorState::Resolved(c) if (c as usize) < WORD_BITS => {
                        assert_eq!(state.candidate_mask(v), color_bit(c as usize));
                    }
                    ColorState::Resolved(_) => assert_eq!(state.candidate_mask(v), 0),
                    ColorState::Pending { .. } => panic!("vertex {v} left pending"),
                }
            }
        });
    }

    /// The vertex of `K70` with exactly two successors, and those successors.
    fn two_successor_vertex(state: &EngineState<'_>, g: &CsrGraph) -> (usize, [usize; 2]) {
        let v = (0..g.node_count())
            .find(|&v| state.state(v) == ColorState::Pending { min: 0, range: 2 })
            .unwrap();
        let beg = g.row(v).start;
        (v, [state.successors[beg], state.successors[beg + 1]])
    }

    #[test]
    fn settles_when_no_pending_successor_can_take_min() {
        let g = generate::complete(WORD_BITS + 6);
        GhostToken::new(|token| {
            let state = initialize(&token, &g, 1).unwrap();
            let (v, [a, b]) = two_successor_vertex(&state, &g);
            // both successors are still open, but above color 0
            state.color[a].store(ColorState::Pending { min: 1, range: 3 });
            state.color[b].store(ColorState::Pending { min: 2, range: 1 });

            assert!(!step(&state, &g, v));
            assert_eq!(state.state(v), ColorState::Resolved(0));
            assert_eq!(state.candidate_mask(v), color_bit(0));
        });
    }

    #[test]
    fn waits_while_a_pending_successor_covers_min() {
        let g = generate::complete(WORD_BITS + 6);
        GhostToken::new(|token| {
            let state = initialize(&token, &g, 1).unwrap();
            let (v, [a, b]) = two_successor_vertex(&state, &g);
            state.color[a].store(ColorState::Pending { min: 1, range: 3 });
            state.color[b].store(ColorState::Pending { min: 0, range: 1 });

            assert!(step(&state, &g, v));
            assert_eq!(state.state(v), ColorState::Pending { min: 0, range: 2 });
        });
    }

    #[test]
    fn early_settling_bounds_the_pass_count() {
        for seed in [1, 2] {
            let g = generate::random(600, 40_000, seed).unwrap();
            GhostToken::new(|token| {
                let state = initialize(&token, &g, 1).unwrap();
                assert!(!state.worklist.is_empty());
                let passes = refine(&token, &state, &g, 1);
                assert!(passes < 70, "seed {seed}: {passes} heavy passes");
                assert!(state
                    .worklist
                    .iter()
                    .all(|&v| state.state(v).color().is_some()));
            });
        }
    }

    #[test]
    fn no_heavy_vertices_means_no_passes() {
        let g = generate::cycle(8);
        GhostToken::new(|token| {
            let state = initialize(&token, &g, 2).unwrap();
            assert_eq!(refine(&token, &state, &g, 2), 0);
        });
    }
}
