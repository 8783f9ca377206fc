//! Serialized circuit representation

use crate::gate::Placement;
use crate::serialization::CIRCUIT_FORMAT_VERSION;
use crate::{QuantumError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value copy of a circuit: grid, composite gate definitions and register layout
///
/// `gates[wire][column]` mirrors the live grid; every row has the same length.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SerializedCircuit {
    /// Format version for compatibility checking
    pub version: u32,
    /// Number of qubits (wires); also the arity when used as a gate definition
    pub num_qubits: usize,
    /// Placement grid, indexed by wire then column
    pub gates: Vec<Vec<Option<Placement>>>,
    /// Composite gate definitions by name
    #[serde(default)]
    pub custom_gates: BTreeMap<String, SerializedCircuit>,
    /// Classical register names and lengths
    #[serde(default)]
    pub cregs: BTreeMap<String, usize>,
}

impl SerializedCircuit {
    /// An empty circuit on `num_qubits` wires
    pub fn new(num_qubits: usize) -> Self {
        Self {
            version: CIRCUIT_FORMAT_VERSION,
            num_qubits,
            gates: vec![Vec::new(); num_qubits],
            custom_gates: BTreeMap::new(),
            cregs: BTreeMap::new(),
        }
    }

    /// Number of columns (length of the first row)
    pub fn num_columns(&self) -> usize {
        self.gates.first().map_or(0, Vec::len)
    }

    /// Check version compatibility
    pub fn check_version(&self) -> Result<()> {
        if self.version > CIRCUIT_FORMAT_VERSION {
            return Err(QuantumError::VersionMismatch {
                expected: CIRCUIT_FORMAT_VERSION,
                actual: self.version,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{GateId, GateOptions};

    #[test]
    fn test_empty_serialized_circuit() {
        let circuit = SerializedCircuit::new(3);
        assert_eq!(circuit.gates.len(), 3);
        assert_eq!(circuit.num_columns(), 0);
        assert!(circuit.check_version().is_ok());
    }

    #[test]
    fn test_json_roundtrip_keeps_placements() {
        let mut circuit = SerializedCircuit::new(2);
        circuit.gates[0].push(Some(Placement {
            id: GateId::new(0),
            name: "cx".to_string(),
            connector: 0,
            options: GateOptions::default(),
        }));
        circuit.gates[1].push(Some(Placement {
            id: GateId::new(0),
            name: "cx".to_string(),
            connector: 1,
            options: GateOptions::default(),
        }));
        circuit.cregs.insert("c".to_string(), 2);

        let json = serde_json::to_string(&circuit).unwrap();
        let back: SerializedCircuit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, circuit);
    }

    #[test]
    fn test_future_version_rejected() {
        let mut circuit = SerializedCircuit::new(1);
        circuit.version = CIRCUIT_FORMAT_VERSION + 1;
        assert!(matches!(
            circuit.check_version(),
            Err(QuantumError::VersionMismatch { .. })
        ));
    }
}
