//! Composite gate decomposition
//!
//! A composite gate is a placement whose name is neither a catalog
//! primitive nor `measure` and which has a registered definition. The
//! decomposer replaces each such placement by the definition's grid using
//! [`Circuit::splice_subcircuit`], after flattening the definition itself.
//!
//! Passes run left to right over columns and top to bottom over wires,
//! and repeat until a full pass splices nothing.

use qgrid_core::{Circuit, GateInstance, QuantumError, Result, MEASURE};
use qgrid_gates::GateCatalog;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Default nesting limit for composite definitions
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Output of [`Decomposer::decompose`]
#[derive(Debug, Clone)]
pub struct Decomposition {
    /// The flattened circuit
    pub circuit: Circuit,
    /// Number of top-level passes, including the final pass that found nothing
    pub passes: usize,
    /// Number of composite placements replaced, at every nesting level
    pub splices: usize,
}

/// Rewrites composite gates into primitive placements
///
/// # Example
/// ```
/// use qgrid_compiler::Decomposer;
/// use qgrid_core::Circuit;
///
/// let mut bell = Circuit::new(2);
/// bell.add_gate("h", None, &[0]).unwrap();
/// bell.add_gate("cx", None, &[0, 1]).unwrap();
///
/// let mut circuit = Circuit::new(3);
/// circuit.register_gate("bell", bell.save()).unwrap();
/// circuit.add_gate("bell", None, &[2, 1]).unwrap();
///
/// let flat = Decomposer::new().decompose(&circuit).unwrap();
/// let names: Vec<_> = flat.circuit.gates().into_iter().map(|g| g.name).collect();
/// assert_eq!(names, ["h", "cx"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Decomposer {
    max_depth: usize,
}

impl Default for Decomposer {
    fn default() -> Self {
        Self::new()
    }
}

impl Decomposer {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit how deeply definitions may nest
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Whether `name` is treated as a composite placement
    pub fn is_composite(name: &str) -> bool {
        name != MEASURE && !GateCatalog::is_primitive(name)
    }

    /// Flatten every composite gate of `circuit`
    ///
    /// The input is left untouched; registers and the definition registry
    /// are carried over to the result.
    ///
    /// # Errors
    /// - `ArityMismatch` when a definition's qubit count differs from the
    ///   number of wires the composite was placed on
    /// - `RecursiveDefinition` when definitions nest deeper than
    ///   [`max_depth`](Self::max_depth)
    /// - any error from loading a stored definition
    pub fn decompose(&self, circuit: &Circuit) -> Result<Decomposition> {
        let mut flat = circuit.clone();
        let mut unresolved = BTreeSet::new();
        let mut passes = 0;
        let mut splices = 0;
        loop {
            passes += 1;
            let spliced = self.pass(&mut flat, 0, &mut unresolved, &mut splices)?;
            debug!(pass = passes, spliced, "decomposition pass");
            if spliced == 0 {
                break;
            }
        }
        for name in &unresolved {
            warn!(gate = %name, "no definition for composite gate; left in place");
        }
        Ok(Decomposition {
            circuit: flat,
            passes,
            splices,
        })
    }

    /// One left-to-right pass; returns the number of splices at this level
    fn pass(
        &self,
        circuit: &mut Circuit,
        depth: usize,
        unresolved: &mut BTreeSet<String>,
        total: &mut usize,
    ) -> Result<usize> {
        let mut spliced = 0;
        let mut column = 0;
        while column < circuit.num_columns() {
            for wire in 0..circuit.num_qubits() {
                let Some(gate) = composite_at(circuit, column, wire) else {
                    continue;
                };
                let Some(sub) = self.expand_definition(circuit, &gate, depth, unresolved, total)?
                else {
                    unresolved.insert(gate.name);
                    continue;
                };
                circuit.splice_subcircuit(column, gate.id, &sub)?;
                spliced += 1;
                *total += 1;
            }
            column += 1;
        }
        Ok(spliced)
    }

    /// Load and fully flatten the definition of `gate`, if it has one
    fn expand_definition(
        &self,
        host: &Circuit,
        gate: &GateInstance,
        depth: usize,
        unresolved: &mut BTreeSet<String>,
        total: &mut usize,
    ) -> Result<Option<Circuit>> {
        let Some(definition) = host.custom_gate(&gate.name) else {
            return Ok(None);
        };
        if depth >= self.max_depth {
            return Err(QuantumError::RecursiveDefinition {
                gate: gate.name.clone(),
                max_depth: self.max_depth,
            });
        }

        let mut sub = Circuit::load(definition)?;
        // A definition sees its own nested gates first, then the host's.
        for (name, outer) in host.custom_gates() {
            if sub.custom_gate(name).is_none() {
                sub.register_gate(name.clone(), outer.clone())?;
            }
        }
        while self.pass(&mut sub, depth + 1, unresolved, total)? > 0 {}
        Ok(Some(sub))
    }
}

fn composite_at(circuit: &Circuit, column: usize, wire: usize) -> Option<GateInstance> {
    let placement = circuit.placement(column, wire)?;
    if placement.connector != 0 || !Decomposer::is_composite(&placement.name) {
        return None;
    }
    circuit.gate_at(column, wire)
}
