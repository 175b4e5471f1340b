//! Branded, lock-free atomic words.
//!
//! These wrap the std atomics with a compile-time brand so that the state of
//! one coloring run cannot be mixed with another's. The brand is zero-sized;
//! after inlining the wrappers are plain atomic instructions.

/// Branded `AtomicBool`.
pub mod bool;
/// Branded `AtomicU64`.
pub mod u64;
/// Branded `AtomicUsize`.
pub mod usize;

pub use bool::GhostAtomicBool;
pub use u64::GhostAtomicU64;
pub use usize::GhostAtomicUsize;
