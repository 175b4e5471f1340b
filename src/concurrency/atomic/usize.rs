use core::{
    marker::PhantomData,
    sync::atomic::{AtomicUsize, Ordering},
};

/// A branded `AtomicUsize`.
///
/// Used for worklist cursors and slots and for the cross-thread maximum
/// reduction done during initialization.
#[repr(transparent)]
pub struct GhostAtomicUsize<'brand> {
    inner: AtomicUsize,
    _brand: PhantomData<&'brand mut ()>,
}

impl<'brand> GhostAtomicUsize<'brand> {
    /// Creates a new branded atomic usize.
    #[inline(always)]
    pub const fn new(value: usize) -> Self {
        Self {
            inner: AtomicUsize::new(value),
            _brand: PhantomData,
        }
    }

    /// Loads the current value.
    #[inline(always)]
    pub fn load(&self, order: Ordering) -> usize {
        self.inner.load(order)
    }

    /// Stores a new value.
    #[inline(always)]
    pub fn store(&self, value: usize, order: Ordering) {
        self.inner.store(value, order);
    }

    /// Adds to the current value, returning the previous value.
    #[inline(always)]
    pub fn fetch_add(&self, value: usize, order: Ordering) -> usize {
        self.inner.fetch_add(value, order)
    }

    /// Raises the current value to at least `value`, returning the previous value.
    #[inline(always)]
    pub fn fetch_max(&self, value: usize, order: Ordering) -> usize {
        self.inner.fetch_max(value, order)
    }

    /// Consumes the atomic and returns the contained value.
    #[inline(always)]
    pub fn into_inner(self) -> usize {
        self.inner.into_inner()
    }
}

unsafe impl<'brand> Send for GhostAtomicUsize<'brand> {}
unsafe impl<'brand> Sync for GhostAtomicUsize<'brand> {}
