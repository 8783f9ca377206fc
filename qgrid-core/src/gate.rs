//! Gate placements and their options
//!
//! A gate instance applied to `k` wires occupies `k` cells of the circuit
//! grid, one [`Placement`] per wire. All cells of one instance share the
//! same [`GateId`] and column; `connector` records the position of the
//! wire in the argument list the gate was created with.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Name of the measurement pseudo-gate
pub const MEASURE: &str = "measure";

/// Identifier shared by every placement of one gate instance
///
/// Ids come from a counter owned by the circuit and are only unique
/// within that circuit.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct GateId(u64);

impl GateId {
    /// Create a gate id from its raw value
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw id value
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Classical control attached to a gate
///
/// The gate runs only when the named register currently holds `value`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub creg: String,
    pub value: u64,
}

impl Condition {
    pub fn new(creg: impl Into<String>, value: u64) -> Self {
        Self {
            creg: creg.into(),
            value,
        }
    }
}

/// Condition of an enclosing composite instance
///
/// Every gate spliced out of one conditioned composite carries the same
/// `scope`, so the register is read once for the whole composite rather
/// than once per spliced gate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedCondition {
    pub scope: u64,
    pub condition: Condition,
}

/// What a placement does when it is executed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    /// A unitary (primitive or composite), with optional angle parameters
    Primitive { params: Vec<f64> },
    /// A single-wire measurement into a classical register bit
    Measure { creg: String, bit: usize },
}

impl Default for GateKind {
    fn default() -> Self {
        GateKind::Primitive { params: Vec::new() }
    }
}

/// Options carried by every placement of a gate instance
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GateOptions {
    pub kind: GateKind,
    #[serde(default)]
    pub condition: Option<Condition>,
    /// Conditions of enclosing composites, outermost first
    #[serde(default)]
    pub enclosing: Vec<ScopedCondition>,
}

impl GateOptions {
    /// Options for a parametrized unitary
    pub fn with_params(params: impl Into<Vec<f64>>) -> Self {
        Self {
            kind: GateKind::Primitive {
                params: params.into(),
            },
            condition: None,
            enclosing: Vec::new(),
        }
    }

    /// Options for a measurement into `creg[bit]`
    pub fn measure(creg: impl Into<String>, bit: usize) -> Self {
        Self {
            kind: GateKind::Measure {
                creg: creg.into(),
                bit,
            },
            condition: None,
            enclosing: Vec::new(),
        }
    }

    /// Attach a classical condition
    pub fn when(mut self, creg: impl Into<String>, value: u64) -> Self {
        self.condition = Some(Condition::new(creg, value));
        self
    }

    /// Check if any condition, own or enclosing, is attached
    pub fn is_conditioned(&self) -> bool {
        self.condition.is_some() || !self.enclosing.is_empty()
    }

    /// Angle parameters (empty for measurements)
    pub fn params(&self) -> &[f64] {
        match &self.kind {
            GateKind::Primitive { params } => params,
            GateKind::Measure { .. } => &[],
        }
    }

    /// Measurement destination, if any
    pub fn destination(&self) -> Option<(&str, usize)> {
        match &self.kind {
            GateKind::Measure { creg, bit } => Some((creg.as_str(), *bit)),
            GateKind::Primitive { .. } => None,
        }
    }
}

/// One cell of the circuit grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub id: GateId,
    pub name: String,
    pub connector: usize,
    #[serde(default)]
    pub options: GateOptions,
}

impl Placement {
    #[inline]
    pub fn is_measure(&self) -> bool {
        self.name == MEASURE
    }
}

/// A gate instance reassembled from its placements
///
/// `wires` is ordered by connector, i.e. it is the wire list the gate
/// was created with.
#[derive(Clone, Debug, PartialEq)]
pub struct GateInstance {
    pub id: GateId,
    pub name: String,
    pub column: usize,
    pub wires: SmallVec<[usize; 3]>,
    pub options: GateOptions,
}

impl GateInstance {
    #[inline]
    pub fn num_wires(&self) -> usize {
        self.wires.len()
    }

    #[inline]
    pub fn is_measure(&self) -> bool {
        self.name == MEASURE
    }
}

impl fmt::Display for GateInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        let params = self.options.params();
        if !params.is_empty() {
            write!(f, "(")?;
            for (i, p) in params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", p)?;
            }
            write!(f, ")")?;
        }
        for (i, w) in self.wires.iter().enumerate() {
            write!(f, "{}q{}", if i == 0 { " " } else { ", " }, w)?;
        }
        if let Some((creg, bit)) = self.options.destination() {
            write!(f, " -> {}[{}]", creg, bit)?;
        }
        let enclosing = self.options.enclosing.iter().map(|s| &s.condition);
        for cond in enclosing.chain(&self.options.condition) {
            write!(f, " if {}=={}", cond.creg, cond.value)?;
        }
        Ok(())
    }
}
