use core::{
    marker::PhantomData,
    sync::atomic::{AtomicU64, Ordering},
};

/// A branded `AtomicU64`.
///
/// This is the word every piece of shared coloring state is made of: color
/// cells, candidate masks, active-neighbor masks and block candidate words.
/// The contract is deliberately small: whole-word load, whole-word store and
/// bit-clear. There is no bit-set, so a cleared candidate can never come back.
#[repr(transparent)]
pub struct GhostAtomicU64<'brand> {
    inner: AtomicU64,
    _brand: PhantomData<&'brand mut ()>,
}

impl<'brand> GhostAtomicU64<'brand> {
    /// Creates a new atomic value.
    #[inline(always)]
    pub const fn new(value: u64) -> Self {
        Self {
            inner: AtomicU64::new(value),
            _brand: PhantomData,
        }
    }

    /// Loads the current value.
    #[inline(always)]
    pub fn load(&self, order: Ordering) -> u64 {
        self.inner.load(order)
    }

    /// Stores a new value.
    #[inline(always)]
    pub fn store(&self, value: u64, order: Ordering) {
        self.inner.store(value, order);
    }

    /// Clears every bit of `mask`, returning the previous value.
    #[inline(always)]
    pub fn clear_bits(&self, mask: u64, order: Ordering) -> u64 {
        self.inner.fetch_and(!mask, order)
    }

    /// Consumes the atomic and returns the contained value.
    #[inline(always)]
    pub fn into_inner(self) -> u64 {
        self.inner.into_inner()
    }
}

unsafe impl<'brand> Send for GhostAtomicU64<'brand> {}
unsafe impl<'brand> Sync for GhostAtomicU64<'brand> {}
