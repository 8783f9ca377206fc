//! Circuit compilation for QGrid
//!
//! The simulator only executes catalog primitives and measurements;
//! [`Decomposer`] rewrites registered composite gates into those before a
//! run.

pub mod decomposition;

pub use decomposition::{Decomposer, Decomposition, DEFAULT_MAX_DEPTH};
