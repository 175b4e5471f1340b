//! `GhostToken` - the brand of one coloring run.
//!
//! Every per-vertex array the engine allocates (color cells, candidate masks,
//! the block candidate map, the heavy worklist) is branded with the lifetime of
//! a single `GhostToken::new` scope. Two runs can never exchange state, and the
//! pass barrier can only be entered by threads that hold a reference to the
//! run's token.
//!
//! ## Core invariant (linearity)
//!
//! `GhostToken<'brand>` is intentionally **not** `Copy`/`Clone`. The brand is
//! created fresh by `new` and cannot be named outside the closure.

/// Invariant lifetime marker used for branding.
pub mod invariant;

pub use invariant::InvariantLifetime;

/// A zero-sized capability naming one coloring run.
#[derive(Debug)]
pub struct GhostToken<'brand>(InvariantLifetime<'brand>);

impl<'brand> GhostToken<'brand> {
    /// Creates a fresh brand and runs `f` with its token.
    ///
    /// # Example
    ///
    /// ```rust
    /// use halo_color::{concurrency::atomic::GhostAtomicU64, GhostToken};
    /// use core::sync::atomic::Ordering;
    ///
    /// let seen = GhostToken::new(|token| {
    ///     let cell: GhostAtomicU64<'_> = GhostAtomicU64::new(7);
    ///     let _ = &token;
    ///     cell.load(Ordering::Relaxed)
    /// });
    /// assert_eq!(seen, 7);
    /// ```
    pub fn new<F, R>(f: F) -> R
    where
        F: for<'new_brand> FnOnce(GhostToken<'new_brand>) -> R,
    {
        f(GhostToken(InvariantLifetime::new()))
    }
}

// `GhostToken` carries no data. Sharing `&GhostToken<'brand>` across worker
// threads only grants the right to enter branded synchronization points; all
// data it guards is already made of atomics.
unsafe impl<'brand> Sync for GhostToken<'brand> {}
