//! Circuit serialization for persistence and custom gate definitions
//!
//! A [`SerializedCircuit`] is a plain value copy of a circuit grid. It is
//! also the form in which composite gate definitions are registered.

pub mod circuit;

pub use circuit::SerializedCircuit;

/// Serialization format version
pub const CIRCUIT_FORMAT_VERSION: u32 = 1;
