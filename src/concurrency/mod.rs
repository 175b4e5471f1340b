//! Concurrency building blocks for the coloring engine.
//!
//! Ghost types enforce aliasing discipline, not synchronization. Everything
//! shared between workers here is an atomic word; the only blocking point is
//! the end-of-pass barrier inside [`phase::run_to_fixpoint`].

pub mod atomic;
pub mod phase;
pub mod scoped;
pub mod sync;
pub mod worklist;

pub use phase::run_to_fixpoint;
pub use worklist::GhostWorklist;
