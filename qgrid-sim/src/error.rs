//! Error types for the simulator

use qgrid_core::QuantumError;
use qgrid_gates::GateError;
use qgrid_state::StateError;
use thiserror::Error;

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Errors that can occur during simulation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulatorError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Gate with no catalog matrix and no definition
    #[error("Unknown gate '{0}'")]
    UnknownGate(String),

    /// Circuit wider than the configured limit
    #[error("Too many qubits: {num_qubits} (maximum {max_qubits})")]
    TooManyQubits { num_qubits: usize, max_qubits: usize },

    /// Initial value that is not 0/1, or that names a wire past the circuit
    #[error("Invalid initial value {value} for wire {wire}")]
    InvalidInitialValue { wire: usize, value: u8 },

    #[error("Circuit error: {0}")]
    Circuit(#[from] QuantumError),

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("Gate error: {0}")]
    Gate(#[from] GateError),
}
