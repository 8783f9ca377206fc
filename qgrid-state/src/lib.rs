//! Sparse state vector simulation for QGrid
//!
//! - [`SparseTransform`]: the index mapper, turning a `k`-wire gate matrix
//!   and its target wires into a sparse operator over the full register
//! - [`SparseState`]: `AHashMap`-backed state vector with `apply`
//! - [`WireMeasurement`]: rounded single-wire probability with the
//!   majority-rule collapse
//!
//! # Example
//!
//! ```
//! use qgrid_gates::GateCatalog;
//! use qgrid_state::{SparseState, SparseTransform, WireMeasurement};
//!
//! let mut state = SparseState::new(2).unwrap();
//! for (name, wires) in [("h", vec![0]), ("cx", vec![0, 1])] {
//!     let matrix = GateCatalog::lookup(name).unwrap();
//!     state.apply(SparseTransform::build(&matrix, &wires, 2).unwrap()).unwrap();
//! }
//! assert_eq!(state.num_amplitudes(), 2);
//! assert_eq!(WireMeasurement::new(1).probability(&state).unwrap(), 0.5);
//! ```

pub mod error;
pub mod measurement;
pub mod sparse_state;
pub mod transform;

pub use error::{Result, StateError};
pub use measurement::{round_probability, MeasurementResult, WireMeasurement};
pub use sparse_state::SparseState;
pub use transform::{wire_mask, SparseTransform};

/// Widest register the sparse index supports
pub const MAX_QUBITS: usize = 30;
