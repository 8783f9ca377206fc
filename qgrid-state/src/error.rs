//! Error types for state vector operations

use thiserror::Error;

/// Errors that can occur during state vector operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Invalid qubit index
    #[error("Invalid qubit index {index} for {num_qubits}-qubit state")]
    InvalidQubitIndex { index: usize, num_qubits: usize },

    /// Register wider than the sparse index can address
    #[error("Too many qubits: {num_qubits} (maximum {max})")]
    TooManyQubits { num_qubits: usize, max: usize },

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The same wire appears twice in a target list
    #[error("Wire {wire} appears more than once in the target list")]
    DuplicateTarget { wire: usize },
}

/// Result type for state vector operations
pub type Result<T> = std::result::Result<T, StateError>;
