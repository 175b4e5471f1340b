//! `GhostBarrier` - a token-gated barrier.

use std::marker::PhantomData;
use std::sync::{Barrier, BarrierWaitResult};

use crate::GhostToken;

/// A barrier that only threads of one branded run can enter.
///
/// The end-of-pass rendezvous of the refiners goes through this type; the
/// `std` barrier underneath also provides the happens-before edge that makes
/// every write of pass `p` visible to every read of pass `p + 1`.
pub struct GhostBarrier<'brand> {
    inner: Barrier,
    parties: usize,
    _brand: PhantomData<fn(&'brand ()) -> &'brand ()>,
}

impl<'brand> GhostBarrier<'brand> {
    /// Creates a barrier for `parties` threads.
    pub fn new(parties: usize) -> Self {
        Self {
            inner: Barrier::new(parties),
            parties,
            _brand: PhantomData,
        }
    }

    /// Number of threads that must arrive before anyone is released.
    pub fn parties(&self) -> usize {
        self.parties
    }

    /// Blocks until all parties have arrived.
    ///
    /// Exactly one caller per generation observes `is_leader() == true`.
    pub fn wait(&self, _token: &GhostToken<'brand>) -> BarrierWaitResult {
        self.inner.wait()
    }
}
