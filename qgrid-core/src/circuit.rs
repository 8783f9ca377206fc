//! Quantum circuit grid
//!
//! A circuit is a rectangular grid of cells indexed by wire (row) and
//! column (time step). Gates placed in the same column never share a
//! wire, and later columns run after earlier ones.

use crate::gate::{GateId, GateInstance, GateKind, GateOptions, Placement, ScopedCondition, MEASURE};
use crate::registers::ClassicalRegisters;
use crate::serialization::{SerializedCircuit, CIRCUIT_FORMAT_VERSION};
use crate::{QuantumError, Result};
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A quantum circuit laid out on a wire × column grid
///
/// # Example
/// ```
/// use qgrid_core::Circuit;
///
/// let mut circuit = Circuit::new(2);
/// circuit.add_gate("h", None, &[0]).unwrap();
/// circuit.add_gate("cx", None, &[0, 1]).unwrap();
/// assert_eq!(circuit.num_columns(), 2);
/// assert_eq!(circuit.gate_at(1, 1).unwrap().wires.as_slice(), &[0, 1]);
/// ```
#[derive(Clone, Debug)]
pub struct Circuit {
    num_qubits: usize,
    /// `grid[wire][column]`; every row has the same length
    grid: Vec<Vec<Option<Placement>>>,
    custom_gates: BTreeMap<String, SerializedCircuit>,
    cregs: ClassicalRegisters,
    next_id: u64,
}

impl Circuit {
    /// Create an empty circuit with the specified number of qubits
    ///
    /// # Panics
    /// Panics if `num_qubits` is 0
    pub fn new(num_qubits: usize) -> Self {
        assert!(num_qubits > 0, "Circuit must have at least one qubit");
        Self {
            num_qubits,
            grid: vec![Vec::new(); num_qubits],
            custom_gates: BTreeMap::new(),
            cregs: ClassicalRegisters::new(),
            next_id: 0,
        }
    }

    /// Get the number of qubits (wires) in the circuit
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the number of columns in the grid
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.grid[0].len()
    }

    /// Check if the grid holds no placements
    pub fn is_empty(&self) -> bool {
        self.grid.iter().all(|row| row.iter().all(Option::is_none))
    }

    /// Number of gate instances in the grid
    pub fn num_gates(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .flatten()
            .filter(|p| p.connector == 0)
            .count()
    }

    /// Raw cell access
    pub fn placement(&self, column: usize, wire: usize) -> Option<&Placement> {
        self.grid.get(wire)?.get(column)?.as_ref()
    }

    /// Index of the last column holding a placement on `wire`
    pub fn last_occupied_column(&self, wire: usize) -> Option<usize> {
        self.grid.get(wire)?.iter().rposition(Option::is_some)
    }

    /// Add a gate without options
    ///
    /// `column: None` appends the gate right after the latest occupant of
    /// any of its wires. Wires beyond the current qubit count grow the
    /// circuit.
    pub fn add_gate(
        &mut self,
        name: impl Into<String>,
        column: Option<usize>,
        wires: &[usize],
    ) -> Result<GateId> {
        self.add_gate_with_options(name, column, wires, GateOptions::default())
    }

    /// Add a measurement of `wire` into `creg[bit]`
    pub fn add_measure(
        &mut self,
        column: Option<usize>,
        wire: usize,
        creg: impl Into<String>,
        bit: usize,
    ) -> Result<GateId> {
        self.add_gate_with_options(MEASURE, column, &[wire], GateOptions::measure(creg, bit))
    }

    /// Add a gate with explicit options
    ///
    /// # Errors
    /// Returns error if:
    /// - `wires` is empty or lists a wire twice
    /// - an explicit `column` is already occupied on one of the wires
    /// - a `measure` gate has no register destination or more than one wire
    pub fn add_gate_with_options(
        &mut self,
        name: impl Into<String>,
        column: Option<usize>,
        wires: &[usize],
        options: GateOptions,
    ) -> Result<GateId> {
        let name = name.into();
        if wires.is_empty() {
            return Err(QuantumError::EmptyWireList(name));
        }
        for (i, &wire) in wires.iter().enumerate() {
            if wires[i + 1..].contains(&wire) {
                return Err(QuantumError::DuplicateWire { gate: name, wire });
            }
        }

        let column = match column {
            Some(column) => {
                for &wire in wires {
                    if self.placement(column, wire).is_some() {
                        return Err(QuantumError::CellOccupied { column, wire });
                    }
                }
                column
            }
            None => wires
                .iter()
                .filter_map(|&w| self.last_occupied_column(w))
                .max()
                .map_or(0, |c| c + 1),
        };

        if name == MEASURE {
            if !matches!(options.kind, GateKind::Measure { .. }) {
                return Err(QuantumError::MissingMeasureDestination {
                    column,
                    wire: wires[0],
                });
            }
            if wires.len() != 1 {
                return Err(QuantumError::arity_mismatch(MEASURE, 1, wires.len()));
            }
        }

        if let Some(&max_wire) = wires.iter().max() {
            self.ensure_wires(max_wire + 1);
        }
        self.ensure_columns(column + 1);

        let id = self.next_gate_id();
        for (connector, &wire) in wires.iter().enumerate() {
            self.grid[wire][column] = Some(Placement {
                id,
                name: name.clone(),
                connector,
                options: options.clone(),
            });
        }
        Ok(id)
    }

    /// Remove the gate instance occupying `(column, wire)`
    ///
    /// All placements of that instance are cleared together. Returns the
    /// id of the removed gate, or `None` if the cell was empty.
    pub fn remove_gate(&mut self, column: usize, wire: usize) -> Option<GateId> {
        let id = self.placement(column, wire)?.id;
        for row in &mut self.grid {
            if matches!(&row[column], Some(p) if p.id == id) {
                row[column] = None;
            }
        }
        Some(id)
    }

    /// Reassemble the gate instance occupying `(column, wire)`
    pub fn gate_at(&self, column: usize, wire: usize) -> Option<GateInstance> {
        let cell = self.placement(column, wire)?;
        let mut connectors: SmallVec<[(usize, usize); 3]> = self
            .grid
            .iter()
            .enumerate()
            .filter_map(|(w, row)| match &row[column] {
                Some(p) if p.id == cell.id => Some((p.connector, w)),
                _ => None,
            })
            .collect();
        connectors.sort_unstable();

        Some(GateInstance {
            id: cell.id,
            name: cell.name.clone(),
            column,
            wires: connectors.into_iter().map(|(_, w)| w).collect(),
            options: cell.options.clone(),
        })
    }

    /// All gate instances in execution order
    ///
    /// Columns ascend; within a column, instances are ordered by the wire
    /// of their first connector.
    pub fn gates(&self) -> Vec<GateInstance> {
        let mut gates = Vec::new();
        for column in 0..self.num_columns() {
            for wire in 0..self.num_qubits {
                if matches!(self.placement(column, wire), Some(p) if p.connector == 0) {
                    gates.extend(self.gate_at(column, wire));
                }
            }
        }
        gates
    }

    /// Remove every placement, keeping registers and custom gates
    pub fn clear(&mut self) {
        for row in &mut self.grid {
            row.clear();
        }
    }

    /// Register a composite gate definition under `name`
    ///
    /// Later `add_gate(name, ..)` calls place it as an opaque gate whose
    /// arity is the definition's qubit count. Re-registering a name
    /// replaces the previous definition.
    pub fn register_gate(
        &mut self,
        name: impl Into<String>,
        definition: SerializedCircuit,
    ) -> Result<()> {
        let name = name.into();
        if name == MEASURE || name.is_empty() {
            return Err(QuantumError::ReservedGateName(name));
        }
        if definition.num_qubits == 0 {
            return Err(QuantumError::EmptyCircuit);
        }
        definition.check_version()?;
        self.custom_gates.insert(name, definition);
        Ok(())
    }

    /// Look up a composite gate definition
    pub fn custom_gate(&self, name: &str) -> Option<&SerializedCircuit> {
        self.custom_gates.get(name)
    }

    /// All composite gate definitions
    pub fn custom_gates(&self) -> &BTreeMap<String, SerializedCircuit> {
        &self.custom_gates
    }

    /// Create a classical register of `len` zero bits
    pub fn create_creg(&mut self, name: impl Into<String>, len: usize) {
        self.cregs.create(name, len);
    }

    /// Set one classical bit, growing the register as needed
    pub fn set_creg_bit(&mut self, name: &str, bit: usize, value: bool) -> Result<()> {
        self.cregs.set_bit(name, bit, value)
    }

    /// Read one classical bit
    pub fn creg_bit(&self, name: &str, bit: usize) -> Result<bool> {
        self.cregs.bit(name, bit)
    }

    /// Integer value of a classical register
    pub fn creg_value(&self, name: &str) -> Result<u64> {
        self.cregs.value(name)
    }

    /// Zero every classical bit
    pub fn reset_cregs(&mut self) {
        self.cregs.reset();
    }

    pub fn cregs(&self) -> &ClassicalRegisters {
        &self.cregs
    }

    pub fn cregs_mut(&mut self) -> &mut ClassicalRegisters {
        &mut self.cregs
    }

    /// Replace the composite gate `id` at `column` by the grid of `sub`
    ///
    /// Row `c` of `sub` replaces the cell of the wire attached to
    /// connector `c`. Every other wire keeps its cell at `column` and gets
    /// `width - 1` empty cells after it, so the grid stays rectangular.
    /// Spliced gate instances receive fresh ids from this circuit.
    ///
    /// Each spliced placement's enclosing list becomes the composite's own
    /// enclosing list, then the composite's condition under a fresh scope,
    /// then the placement's previous entries with scopes renumbered from
    /// this circuit's counter.
    pub fn splice_subcircuit(&mut self, column: usize, id: GateId, sub: &Circuit) -> Result<()> {
        let wire = (0..self.num_qubits)
            .find(|&w| matches!(self.placement(column, w), Some(p) if p.id == id))
            .ok_or_else(|| {
                QuantumError::invalid_placement(format!("gate {} not found in column {}", id, column))
            })?;
        let instance = self
            .gate_at(column, wire)
            .ok_or_else(|| QuantumError::invalid_placement(format!("gate {} vanished", id)))?;

        let arity = instance.num_wires();
        if sub.num_qubits != arity {
            return Err(QuantumError::arity_mismatch(
                instance.name,
                sub.num_qubits,
                arity,
            ));
        }

        let width = sub.num_columns().max(1);

        let mut outer = instance.options.enclosing.clone();
        if let Some(condition) = instance.options.condition.clone() {
            outer.push(ScopedCondition {
                scope: self.next_gate_id().value(),
                condition,
            });
        }

        let mut fresh: HashMap<GateId, GateId> = HashMap::new();
        let mut scopes: HashMap<u64, u64> = HashMap::new();
        for col in 0..sub.num_columns() {
            for row in &sub.grid {
                let Some(p) = &row[col] else {
                    continue;
                };
                if !fresh.contains_key(&p.id) {
                    let next = self.next_gate_id();
                    fresh.insert(p.id, next);
                }
                for scoped in &p.options.enclosing {
                    if !scopes.contains_key(&scoped.scope) {
                        let next = self.next_gate_id().value();
                        scopes.insert(scoped.scope, next);
                    }
                }
            }
        }

        for (w, row) in self.grid.iter_mut().enumerate() {
            match instance.wires.iter().position(|&x| x == w) {
                Some(connector) => {
                    let cells = (0..width).map(|col| {
                        sub.grid[connector]
                            .get(col)
                            .cloned()
                            .flatten()
                            .map(|mut p| {
                                p.id = fresh[&p.id];
                                let inner = std::mem::take(&mut p.options.enclosing)
                                    .into_iter()
                                    .map(|mut scoped| {
                                        scoped.scope = scopes[&scoped.scope];
                                        scoped
                                    });
                                p.options.enclosing = outer.iter().cloned().chain(inner).collect();
                                p
                            })
                    });
                    row.splice(column..=column, cells);
                }
                None => {
                    row.splice(
                        column + 1..column + 1,
                        std::iter::repeat(None).take(width - 1),
                    );
                }
            }
        }
        Ok(())
    }

    /// Deep value copy of the circuit
    pub fn save(&self) -> SerializedCircuit {
        SerializedCircuit {
            version: CIRCUIT_FORMAT_VERSION,
            num_qubits: self.num_qubits,
            gates: self.grid.clone(),
            custom_gates: self.custom_gates.clone(),
            cregs: self.cregs.layout(),
        }
    }

    /// Rebuild a circuit from a value copy
    ///
    /// # Errors
    /// Returns error if the version is unsupported, the circuit has no
    /// qubits, the grid is not rectangular, or a gate's connectors are not
    /// exactly `0..k` on distinct wires of one column.
    pub fn load(serialized: &SerializedCircuit) -> Result<Self> {
        serialized.check_version()?;
        if serialized.num_qubits == 0 {
            return Err(QuantumError::EmptyCircuit);
        }
        if serialized.gates.len() > serialized.num_qubits {
            return Err(QuantumError::invalid_placement(format!(
                "{} grid rows for {} qubits",
                serialized.gates.len(),
                serialized.num_qubits
            )));
        }

        let num_columns = serialized.gates.iter().map(Vec::len).max().unwrap_or(0);
        let mut grid = serialized.gates.clone();
        grid.resize(serialized.num_qubits, Vec::new());
        for row in &mut grid {
            row.resize(num_columns, None);
        }

        let next_id = validate_grid(&grid)?;

        let mut cregs = ClassicalRegisters::new();
        for (name, &len) in &serialized.cregs {
            cregs.create(name.clone(), len);
        }

        Ok(Self {
            num_qubits: serialized.num_qubits,
            grid,
            custom_gates: serialized.custom_gates.clone(),
            cregs,
            next_id,
        })
    }

    /// Serialize circuit to JSON format
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.save())
            .map_err(|e| QuantumError::SerializationError(format!("JSON serialization failed: {}", e)))
    }

    /// Serialize circuit to pretty-printed JSON format
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.save())
            .map_err(|e| QuantumError::SerializationError(format!("JSON serialization failed: {}", e)))
    }

    /// Deserialize circuit from JSON format
    pub fn from_json(json: &str) -> Result<Self> {
        let serialized: SerializedCircuit = serde_json::from_str(json).map_err(|e| {
            QuantumError::DeserializationError(format!("JSON deserialization failed: {}", e))
        })?;
        Self::load(&serialized)
    }

    /// Serialize circuit to binary format
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(&self.save()).map_err(|e| {
            QuantumError::SerializationError(format!("Binary serialization failed: {}", e))
        })
    }

    /// Deserialize circuit from binary format
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let serialized: SerializedCircuit = bincode::deserialize(bytes).map_err(|e| {
            QuantumError::DeserializationError(format!("Binary deserialization failed: {}", e))
        })?;
        Self::load(&serialized)
    }

    fn next_gate_id(&mut self) -> GateId {
        let id = GateId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn ensure_wires(&mut self, num_qubits: usize) {
        if num_qubits > self.num_qubits {
            let columns = self.num_columns();
            self.grid.resize(num_qubits, vec![None; columns]);
            self.num_qubits = num_qubits;
        }
    }

    fn ensure_columns(&mut self, num_columns: usize) {
        if num_columns > self.num_columns() {
            for row in &mut self.grid {
                row.resize(num_columns, None);
            }
        }
    }
}

/// Check the connector invariant and return the next free id
///
/// All cells of one id must also agree on name and options.
fn validate_grid(grid: &[Vec<Option<Placement>>]) -> Result<u64> {
    let num_columns = grid.first().map_or(0, Vec::len);
    let mut seen_in: HashMap<GateId, usize> = HashMap::new();
    let mut next_id = 0;

    for column in 0..num_columns {
        let mut connectors: HashMap<GateId, Vec<usize>> = HashMap::new();
        let mut first: HashMap<GateId, &Placement> = HashMap::new();
        for row in grid {
            let Some(p) = &row[column] else {
                continue;
            };
            let head = *first.entry(p.id).or_insert(p);
            if head.name != p.name || head.options != p.options {
                return Err(QuantumError::invalid_placement(format!(
                    "cells of gate {} in column {} disagree ({} vs {})",
                    p.id, column, head.name, p.name
                )));
            }
            connectors.entry(p.id).or_default().push(p.connector);
        }
        for scoped in first.values().flat_map(|p| &p.options.enclosing) {
            next_id = next_id.max(scoped.scope + 1);
        }
        for (id, mut list) in connectors {
            if let Some(previous) = seen_in.insert(id, column) {
                return Err(QuantumError::invalid_placement(format!(
                    "gate {} appears in columns {} and {}",
                    id, previous, column
                )));
            }
            list.sort_unstable();
            if list.iter().enumerate().any(|(i, &c)| i != c) {
                return Err(QuantumError::invalid_placement(format!(
                    "gate {} in column {} has connectors {:?}",
                    id, column, list
                )));
            }
            next_id = next_id.max(id.value() + 1);
        }
    }
    Ok(next_id)
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let gates = self.gates();
        writeln!(
            f,
            "Circuit({} qubits, {} columns, {} gates)",
            self.num_qubits,
            self.num_columns(),
            gates.len()
        )?;
        for gate in &gates {
            writeln!(f, "  {}: {}", gate.column, gate)?;
        }
        Ok(())
    }
}
