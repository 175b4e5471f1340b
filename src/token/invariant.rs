use core::marker::PhantomData;

/// A marker type that is invariant in its lifetime parameter `'id`.
///
/// Without invariance the compiler could shrink one run's brand to unify it
/// with another's, and branded arrays of two runs would type-check together.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct InvariantLifetime<'id>(PhantomData<fn(&'id ()) -> &'id ()>);

impl<'id> InvariantLifetime<'id> {
    /// Creates a new invariant lifetime marker.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}
