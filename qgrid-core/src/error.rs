//! Error types for QGrid circuits

use thiserror::Error;

/// Errors that can occur while building, editing or (de)serializing a circuit
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuantumError {
    /// Circuit has no qubits
    #[error("Circuit must have at least one qubit")]
    EmptyCircuit,

    /// Gate placed with an empty wire list
    #[error("Gate '{0}' must act on at least one wire")]
    EmptyWireList(String),

    /// Same wire passed twice to one gate
    #[error("Duplicate wire {wire} in gate '{gate}'")]
    DuplicateWire { gate: String, wire: usize },

    /// Target cell already holds another gate
    #[error("Cell at column {column}, wire {wire} is already occupied")]
    CellOccupied { column: usize, wire: usize },

    /// A measurement placement without a classical destination
    #[error("Measurement at column {column}, wire {wire} has no destination register")]
    MissingMeasureDestination { column: usize, wire: usize },

    /// Classical register lookup failed
    #[error("Unknown classical register '{0}'")]
    UnknownRegister(String),

    /// Register value does not fit the integer representation
    #[error("Classical register '{register}' has a set bit beyond position 63 (length {len})")]
    RegisterOverflow { register: String, len: usize },

    /// Name cannot be used for a custom gate
    #[error("Gate name '{0}' is reserved")]
    ReservedGateName(String),

    /// Composite gate wire count differs from its definition
    #[error("Gate '{gate}' is defined on {expected} wires, but {actual} were provided")]
    ArityMismatch {
        gate: String,
        expected: usize,
        actual: usize,
    },

    /// Composite gate definitions reference themselves or nest too deeply
    #[error("Definition of gate '{gate}' is recursive or nested deeper than {max_depth} levels")]
    RecursiveDefinition { gate: String, max_depth: usize },

    /// Grid content violates the placement invariants
    #[error("Invalid placement: {0}")]
    InvalidPlacement(String),

    /// Serialization failed
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Deserialization failed
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// Serialized format is newer than this library understands
    #[error("Circuit format version {actual} is not supported (max {expected})")]
    VersionMismatch { expected: u32, actual: u32 },
}

impl QuantumError {
    /// Create an arity mismatch error
    pub fn arity_mismatch(gate: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ArityMismatch {
            gate: gate.into(),
            expected,
            actual,
        }
    }

    /// Create an invalid placement error
    pub fn invalid_placement(msg: impl Into<String>) -> Self {
        Self::InvalidPlacement(msg.into())
    }
}
