//! Core types for the QGrid circuit simulator
//!
//! This crate provides the circuit graph that the simulator replays:
//! - [`Circuit`]: wire × column grid of gate placements, composite gate
//!   registry and classical registers
//! - [`Placement`] / [`GateInstance`]: one grid cell / one reassembled gate
//! - [`GateOptions`]: parameters, measurement destination and classical condition
//! - [`SerializedCircuit`]: value copy used for persistence and gate definitions
//!
//! # Example
//! ```
//! use qgrid_core::{Circuit, GateOptions};
//!
//! let mut circuit = Circuit::new(2);
//! circuit.create_creg("c", 2);
//! circuit.add_gate("h", None, &[0]).unwrap();
//! circuit.add_gate("cx", None, &[0, 1]).unwrap();
//! circuit.add_measure(None, 1, "c", 0).unwrap();
//! circuit
//!     .add_gate_with_options("x", None, &[0], GateOptions::default().when("c", 1))
//!     .unwrap();
//! assert_eq!(circuit.num_gates(), 4);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod registers;
pub mod serialization;

// Re-exports for convenience
pub use circuit::Circuit;
pub use error::QuantumError;
pub use gate::{
    Condition, GateId, GateInstance, GateKind, GateOptions, Placement, ScopedCondition, MEASURE,
};
pub use registers::ClassicalRegisters;
pub use serialization::{SerializedCircuit, CIRCUIT_FORMAT_VERSION};

/// Type alias for results in QGrid
pub type Result<T> = std::result::Result<T, QuantumError>;
