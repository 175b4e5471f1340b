//! Branded scoped-thread helpers (std-only, minimal overhead).
//!
//! Every parallel phase of the engine is the same shape: split an index range
//! into one contiguous slice per worker, hand each worker `&GhostToken<'brand>`
//! and its slice, join. No vertex is owned by two workers within one pass.

use core::ops::Range;

use crate::GhostToken;

/// A scoped environment that can spawn tasks using a shared `&GhostToken<'brand>`.
pub struct GhostReadScope<'scope, 'env, 'brand> {
    scope: &'scope std::thread::Scope<'scope, 'env>,
    token: &'env GhostToken<'brand>,
}

impl<'scope, 'env, 'brand> GhostReadScope<'scope, 'env, 'brand> {
    /// Spawns a scoped thread that receives `&GhostToken<'brand>`.
    #[inline]
    pub fn spawn<T, F>(&self, f: F) -> std::thread::ScopedJoinHandle<'scope, T>
    where
        T: Send + 'scope,
        F: FnOnce(&'env GhostToken<'brand>) -> T + Send + 'scope,
    {
        let t = self.token;
        self.scope.spawn(move || f(t))
    }
}

/// Runs a scoped region where `&GhostToken<'brand>` is shared with spawned threads.
#[inline]
pub fn with_read_scope<'env, 'brand, R, F>(token: &'env GhostToken<'brand>, f: F) -> R
where
    F: for<'scope> FnOnce(GhostReadScope<'scope, 'env, 'brand>) -> R,
{
    std::thread::scope(|scope| f(GhostReadScope { scope, token }))
}

/// Splits `0..len` into `parts` contiguous ranges whose lengths differ by at most one.
///
/// The first `len % parts` ranges get the extra element. Empty ranges are
/// produced when `parts > len`.
///
/// # Panics
/// Panics if `parts == 0`.
pub fn partition(len: usize, parts: usize) -> impl Iterator<Item = Range<usize>> {
    assert!(parts != 0, "parts must be > 0");
    let base = len / parts;
    let extra = len % parts;
    (0..parts).map(move |i| {
        let start = i * base + i.min(extra);
        let end = start + base + usize::from(i < extra);
        start..end
    })
}

/// Runs `work(token, worker, range)` on `threads` scoped threads, one
/// partition range each, and returns the results in worker order.
///
/// A panic in any worker is re-raised on the calling thread after all
/// workers have been joined.
///
/// # Panics
/// Panics if `threads == 0`.
pub fn for_each_range<'brand, T, F>(
    token: &GhostToken<'brand>,
    threads: usize,
    len: usize,
    work: F,
) -> Vec<T>
where
    T: Send,
    F: Fn(&GhostToken<'brand>, usize, Range<usize>) -> T + Sync,
{
    assert!(threads != 0, "threads must be > 0");
    with_read_scope(token, |scope| {
        let work = &work;
        let handles: Vec<_> = partition(len, threads)
            .enumerate()
            .map(|(worker, range)| scope.spawn(move |t| work(t, worker, range)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|payload| std::panic::resume_unwind(payload)))
            .collect()
    })
}
