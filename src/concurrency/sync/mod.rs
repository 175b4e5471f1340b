//! Synchronization points shared by the worker pool.

pub mod ghost_barrier;

pub use ghost_barrier::GhostBarrier;
