//! Graph input: the immutable CSR structure the engine consumes, plus its
//! file codecs and generators.

pub mod csr;
pub mod egr;
pub mod generate;
pub mod snap;

pub use csr::CsrGraph;
pub use egr::{encode_egr, parse_egr, read_egr, write_egr};
pub use snap::{parse_snap, read_snap, write_snap};
