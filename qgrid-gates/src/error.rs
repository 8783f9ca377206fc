//! Error types for gate lookup

use thiserror::Error;

/// Errors that can occur while resolving a gate matrix
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GateError {
    /// Wrong number of angle parameters for a gate
    #[error("Gate '{gate}' takes {expected} parameters, but {actual} were provided")]
    InvalidParameterCount {
        gate: String,
        expected: usize,
        actual: usize,
    },
}

/// Result type for gate operations
pub type Result<T> = std::result::Result<T, GateError>;
