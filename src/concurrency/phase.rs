//! Barrier-synchronized iterate-to-fixpoint driver.
//!
//! A refiner phase is a sequence of passes. In each pass every worker walks
//! its own slice once and reports whether anything in it is still pending.
//! All workers then meet at a [`GhostBarrier`] and read the same progress
//! flag, so they agree on whether another pass is needed and leave the loop
//! on the same generation.
//!
//! Progress flags rotate over three slots indexed by generation. Slot
//! `g % 3` is written during pass `g` and read right after barrier `g`;
//! worker 0 clears slot `(g + 1) % 3` at the start of pass `g`. The last
//! readers of that slot (generation `g - 2`) finished before barrier `g - 1`,
//! and its next writers start after barrier `g`, so the clear never races.

use core::ops::Range;
use core::sync::atomic::Ordering;

use crossbeam_utils::CachePadded;

use crate::{
    concurrency::{atomic::GhostAtomicBool, scoped::for_each_range, sync::GhostBarrier},
    GhostToken,
};

const SLOTS: usize = 3;

/// Shared state of one fixpoint loop.
pub struct FixpointLoop<'brand> {
    barrier: GhostBarrier<'brand>,
    progress: [CachePadded<GhostAtomicBool<'brand>>; SLOTS],
}

impl<'brand> FixpointLoop<'brand> {
    /// Creates a loop for exactly `workers` participating threads.
    pub fn new(workers: usize) -> Self {
        Self {
            barrier: GhostBarrier::new(workers),
            progress: [
                CachePadded::new(GhostAtomicBool::new(false)),
                CachePadded::new(GhostAtomicBool::new(false)),
                CachePadded::new(GhostAtomicBool::new(false)),
            ],
        }
    }

    #[inline(always)]
    fn slot(&self, generation: usize) -> &GhostAtomicBool<'brand> {
        &self.progress[generation % SLOTS]
    }

    /// Worker side of the loop. `pass` returns `true` while the worker's
    /// slice still has pending work. Returns the number of passes executed.
    pub fn drive(
        &self,
        token: &GhostToken<'brand>,
        worker: usize,
        mut pass: impl FnMut() -> bool,
    ) -> usize {
        let mut generation = 0usize;
        loop {
            if worker == 0 {
                self.slot(generation + 1).store(false, Ordering::Relaxed);
            }
            if pass() {
                self.slot(generation).store(true, Ordering::Relaxed);
            }
            self.barrier.wait(token);
            let again = self.slot(generation).load(Ordering::Relaxed);
            generation += 1;
            if !again {
                return generation;
            }
        }
    }
}

/// Runs `pass` over `0..len` with `threads` workers until a full pass in
/// which no worker reports pending work. Returns the number of passes.
///
/// Each worker always receives the same contiguous slice. With `len == 0`
/// nothing is spawned and `0` is returned.
pub fn run_to_fixpoint<'brand, F>(
    token: &GhostToken<'brand>,
    threads: usize,
    len: usize,
    pass: F,
) -> usize
where
    F: Fn(Range<usize>) -> bool + Sync,
{
    if len == 0 {
        return 0;
    }
    let workers = threads.clamp(1, len);
    let fixpoint = FixpointLoop::new(workers);
    debug_assert_eq!(fixpoint.barrier.parties(), workers);
    let passes = for_each_range(token, workers, len, |token, worker, range| {
        fixpoint.drive(token, worker, || pass(range.clone()))
    });
    debug_assert!(passes.windows(2).all(|w| w[0] == w[1]));
    passes.into_iter().max().unwrap_or(0)
}
