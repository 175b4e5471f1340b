//! A fixed-capacity, append-only worklist filled concurrently.
//!
//! Appends claim a slot with one `fetch_add` on the shared length; there is no
//! pop. Once all producers have been joined the list is frozen into a plain
//! `Vec` and iterated by index ranges.

use core::sync::atomic::Ordering;

use crate::concurrency::atomic::GhostAtomicUsize;

/// A branded append-only list of indices with a fixed capacity.
pub struct GhostWorklist<'brand> {
    len: GhostAtomicUsize<'brand>,
    slots: Vec<GhostAtomicUsize<'brand>>,
}

impl<'brand> GhostWorklist<'brand> {
    /// Creates an empty worklist that can hold `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let slots = (0..capacity).map(|_| GhostAtomicUsize::new(0)).collect();
        Self {
            len: GhostAtomicUsize::new(0),
            slots,
        }
    }

    /// Appends `value`.
    ///
    /// # Panics
    /// Panics if the capacity is exhausted.
    #[inline]
    pub fn push(&self, value: usize) {
        let at = self.len.fetch_add(1, Ordering::Relaxed);
        assert!(at < self.slots.len(), "worklist capacity {} exceeded", self.slots.len());
        self.slots[at].store(value, Ordering::Relaxed);
    }

    /// Number of entries appended so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed).min(self.slots.len())
    }

    /// Returns `true` if nothing has been appended.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freezes the list. Entries appear in claim order, which depends on
    /// thread interleaving.
    pub fn into_vec(self) -> Vec<usize> {
        let len = self.len();
        self.slots
            .into_iter()
            .take(len)
            .map(GhostAtomicUsize::into_inner)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{concurrency::scoped::for_each_range, GhostToken};

    #[test]
    fn concurrent_appends_keep_every_value() {
        GhostToken::new(|token| {
            let wl = GhostWorklist::with_capacity(1000);
            for_each_range(&token, 4, 1000, |_, _, range| {
                for v in range.filter(|v| v % 3 == 0) {
                    wl.push(v);
                }
            });
            assert_eq!(wl.len(), 334);
            let mut items = wl.into_vec();
            items.sort_unstable();
            assert_eq!(items, (0..1000).filter(|v| v % 3 == 0).collect::<Vec<_>>());
        });
    }

    #[test]
    #[should_panic(expected = "capacity")]
    fn push_past_capacity_panics() {
        let wl: GhostWorklist<'_> = GhostWorklist::with_capacity(1);
        wl.push(1);
        wl.push(2);
    }
}
