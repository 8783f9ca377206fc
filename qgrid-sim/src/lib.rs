//! Sparse state vector simulator for QGrid circuits
//!
//! [`Simulator`] replays a [`qgrid_core::Circuit`] on a
//! [`qgrid_state::SparseState`]:
//!
//! 1. reset the state to |0...0⟩ and zero the classical registers
//! 2. flatten composite gates with [`qgrid_compiler::Decomposer`]
//! 3. prepare initial values with `x` gates
//! 4. apply each placement in column order, checking classical
//!    conditions, measuring into registers and skipping or rejecting
//!    unknown gates per [`UnknownGatePolicy`]
//!
//! # Example
//!
//! ```
//! use qgrid_core::Circuit;
//! use qgrid_sim::{Simulator, SimulatorConfig};
//!
//! let mut circuit = Circuit::new(2);
//! circuit.create_creg("c", 1);
//! circuit.add_gate("cx", None, &[0, 1]).unwrap();
//! circuit.add_measure(None, 1, "c", 0).unwrap();
//!
//! let mut sim = Simulator::new(circuit, SimulatorConfig::default()).unwrap();
//! sim.run(&[1, 0]).unwrap();
//! assert!(sim.circuit().creg_bit("c", 0).unwrap());
//! ```

pub mod config;
pub mod error;
pub mod simulator;
pub mod statistics;

pub use config::{SimulatorConfig, UnknownGatePolicy};
pub use error::{Result, SimulatorError};
pub use simulator::{RandomSource, Simulator};
pub use statistics::ExecutionStatistics;
