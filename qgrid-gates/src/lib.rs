//! Gate matrix catalog for QGrid
//!
//! This crate maps gate names to dense unitaries:
//!
//! - [`matrices`]: constant matrices for the fixed primitives and the
//!   angle-parametrized single-qubit families
//! - [`GateMatrix`]: row-major dense matrix with `controlled`, `adjoint`
//!   and unitarity checks
//! - [`GateCatalog`]: name → matrix lookup, including `c`-prefixed
//!   controlled variants
//!
//! # Example
//!
//! ```
//! use qgrid_gates::{GateCatalog, GateMatrix};
//! use qgrid_gates::matrices::CNOT;
//!
//! let cx = GateCatalog::lookup("cx").unwrap();
//! assert_eq!(cx, GateMatrix::from_rows(&CNOT));
//!
//! let crz = GateCatalog::resolve("crz", &[0.5]).unwrap().unwrap();
//! assert!(crz.is_unitary(1e-12));
//! ```

pub mod catalog;
pub mod error;
pub mod matrices;
pub mod matrix;

pub use catalog::GateCatalog;
pub use error::{GateError, Result};
pub use matrix::GateMatrix;
