//! Core simulator implementation

use num_complex::Complex64;
use qgrid_compiler::Decomposer;
use qgrid_core::{Circuit, Condition, GateInstance, QuantumError, SerializedCircuit};
use qgrid_gates::{GateCatalog, GateMatrix};
use qgrid_state::{round_probability, wire_mask, SparseState, SparseTransform, WireMeasurement};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;
use tracing::{debug, warn};

use crate::{
    config::{SimulatorConfig, UnknownGatePolicy},
    error::{Result, SimulatorError},
    statistics::ExecutionStatistics,
};

/// Source of uniform draws in `[0, 1)` for the measurement coin flip
pub type RandomSource = Box<dyn FnMut() -> f64 + Send>;

/// Sparse state vector simulator bound to one circuit
///
/// The simulator owns the circuit (including its classical registers)
/// and the state it evolves. `run` resets both, flattens composite gates
/// and replays the grid column by column.
///
/// # Example
///
/// ```
/// use qgrid_core::Circuit;
/// use qgrid_sim::{Simulator, SimulatorConfig};
///
/// let mut circuit = Circuit::new(2);
/// circuit.add_gate("h", None, &[0]).unwrap();
/// circuit.add_gate("cx", None, &[0, 1]).unwrap();
///
/// let mut sim = Simulator::new(circuit, SimulatorConfig::deterministic(1)).unwrap();
/// sim.run(&[]).unwrap();
/// assert_eq!(sim.state().num_amplitudes(), 2);
/// assert_eq!(sim.probabilities(), vec![0.5, 0.5]);
/// ```
pub struct Simulator {
    circuit: Circuit,
    state: SparseState,
    config: SimulatorConfig,
    random: RandomSource,
    statistics: Option<ExecutionStatistics>,
}

impl Simulator {
    /// Create a simulator with a generator seeded from `config.seed`
    ///
    /// # Errors
    /// Returns `InvalidConfig` for a configuration that fails validation
    /// and `TooManyQubits` for a circuit wider than `config.max_qubits`.
    pub fn new(circuit: Circuit, config: SimulatorConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_random_source(circuit, config, move || rng.gen::<f64>())
    }

    /// Create a simulator that draws coin flips from `source`
    pub fn with_random_source(
        circuit: Circuit,
        config: SimulatorConfig,
        source: impl FnMut() -> f64 + Send + 'static,
    ) -> Result<Self> {
        config.validate().map_err(SimulatorError::InvalidConfig)?;
        check_width(circuit.num_qubits(), &config)?;
        let state = SparseState::new(circuit.num_qubits())?;
        Ok(Self {
            circuit,
            state,
            config,
            random: Box::new(source),
            statistics: None,
        })
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Mutable access for editing the circuit between runs
    pub fn circuit_mut(&mut self) -> &mut Circuit {
        &mut self.circuit
    }

    pub fn state(&self) -> &SparseState {
        &self.state
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Statistics of the last `run`, when collection is enabled
    pub fn statistics(&self) -> Option<&ExecutionStatistics> {
        self.statistics.as_ref()
    }

    /// Reset to |0...0⟩ over the current circuit width and zero all registers
    pub fn reset_state(&mut self) -> Result<()> {
        check_width(self.circuit.num_qubits(), &self.config)?;
        self.state = SparseState::new(self.circuit.num_qubits())?;
        self.circuit.reset_cregs();
        Ok(())
    }

    /// Execute the circuit from a fresh state
    ///
    /// `initial_values[w] == 1` prepares wire `w` in |1⟩ before the first
    /// column. Zeros past the last wire are ignored.
    ///
    /// # Errors
    /// - `InvalidInitialValue` for a value other than 0/1, or a 1 past the
    ///   last wire
    /// - `UnknownGate` under [`UnknownGatePolicy::Fail`]
    /// - decomposition, register and state errors from the layers below
    pub fn run(&mut self, initial_values: &[u8]) -> Result<()> {
        let start = Instant::now();
        let mut stats = ExecutionStatistics::new();

        self.reset_state()?;
        let num_qubits = self.circuit.num_qubits();
        for (wire, &value) in initial_values.iter().enumerate() {
            if value > 1 || (value == 1 && wire >= num_qubits) {
                return Err(SimulatorError::InvalidInitialValue { wire, value });
            }
        }
        debug!(num_qubits, "run started");

        let decompose_start = Instant::now();
        let decomposition = Decomposer::new().decompose(&self.circuit)?;
        stats.decomposition_time = decompose_start.elapsed();
        stats.decomposition_passes = decomposition.passes;
        stats.splices = decomposition.splices;

        for (wire, &value) in initial_values.iter().enumerate() {
            if value == 1 {
                self.apply_gate("x", &[wire], &[])?;
                stats.gates_applied += 1;
            }
        }
        stats.peak_amplitudes = self.state.num_amplitudes();

        let mut verdicts = HashMap::new();
        for gate in decomposition.circuit.gates() {
            self.execute(&gate, &mut verdicts, &mut stats)?;
        }

        stats.total_time = start.elapsed();
        debug!(
            gates = stats.gates_applied,
            measurements = stats.measurements,
            amplitudes = self.state.num_amplitudes(),
            "run finished"
        );
        self.statistics = self.config.collect_statistics.then_some(stats);
        Ok(())
    }

    /// Run one flattened gate
    ///
    /// `verdicts` caches enclosing-scope outcomes for the current run: a
    /// composite's condition is read when its first spliced gate comes up
    /// and reused for the rest of its gates. The gate's own condition is
    /// read immediately before it.
    fn execute(
        &mut self,
        gate: &GateInstance,
        verdicts: &mut HashMap<u64, bool>,
        stats: &mut ExecutionStatistics,
    ) -> Result<()> {
        for scoped in &gate.options.enclosing {
            let holds = match verdicts.get(&scoped.scope) {
                Some(&holds) => holds,
                None => {
                    let holds = self.condition_holds(&scoped.condition)?;
                    verdicts.insert(scoped.scope, holds);
                    holds
                }
            };
            if !holds {
                debug!(gate = %gate, scope = scoped.scope, "enclosing condition not met, skipping");
                stats.conditional_skips += 1;
                return Ok(());
            }
        }
        if let Some(condition) = &gate.options.condition {
            if !self.condition_holds(condition)? {
                debug!(gate = %gate, "condition not met, skipping");
                stats.conditional_skips += 1;
                return Ok(());
            }
        }

        if gate.is_measure() {
            let (creg, bit) = gate.options.destination().ok_or(
                QuantumError::MissingMeasureDestination {
                    column: gate.column,
                    wire: gate.wires[0],
                },
            )?;
            let measure_start = Instant::now();
            self.measure(gate.wires[0], Some((creg, bit)))?;
            stats.measurement_time += measure_start.elapsed();
            stats.measurements += 1;
            return Ok(());
        }

        let Some(matrix) = GateCatalog::resolve(&gate.name, gate.options.params())? else {
            return match self.config.unknown_gates {
                UnknownGatePolicy::Skip => {
                    warn!(gate = %gate.name, column = gate.column, "unknown gate skipped");
                    stats.unknown_gates_skipped += 1;
                    Ok(())
                }
                UnknownGatePolicy::Fail => Err(SimulatorError::UnknownGate(gate.name.clone())),
            };
        };

        let apply_start = Instant::now();
        self.apply_matrix(&matrix, &gate.wires)?;
        stats.gate_application_time += apply_start.elapsed();
        stats.gates_applied += 1;
        stats.peak_amplitudes = stats.peak_amplitudes.max(self.state.num_amplitudes());
        Ok(())
    }

    fn condition_holds(&self, condition: &Condition) -> Result<bool> {
        Ok(self.circuit.creg_value(&condition.creg)? == condition.value)
    }

    /// Apply one catalog gate to the current state
    ///
    /// # Errors
    /// Returns `UnknownGate` if `name` is not in the catalog, or a state
    /// error for invalid wires.
    pub fn apply_gate(&mut self, name: &str, wires: &[usize], params: &[f64]) -> Result<()> {
        let matrix = GateCatalog::resolve(name, params)?
            .ok_or_else(|| SimulatorError::UnknownGate(name.to_string()))?;
        self.apply_matrix(&matrix, wires)
    }

    fn apply_matrix(&mut self, matrix: &GateMatrix, wires: &[usize]) -> Result<()> {
        let transform = SparseTransform::build(matrix, wires, self.state.num_qubits())?;
        self.state.apply(transform)?;
        Ok(())
    }

    /// Rounded probability that `wire` reads 1
    ///
    /// With a destination, the wire is also collapsed to a classical bit by
    /// the majority rule and written to `creg[bit]`. The quantum state is
    /// not changed either way.
    pub fn measure(&mut self, wire: usize, destination: Option<(&str, usize)>) -> Result<f64> {
        let measurement = WireMeasurement::new(wire);
        let Some((creg, bit)) = destination else {
            return Ok(measurement.probability(&self.state)?);
        };
        let result = measurement.measure(&self.state, &mut *self.random)?;
        self.circuit.set_creg_bit(creg, bit, result.as_bool())?;
        Ok(result.probability)
    }

    /// Rounded probability of reading 1 on every wire
    pub fn probabilities(&self) -> Vec<f64> {
        let num_qubits = self.state.num_qubits();
        let mut probabilities = vec![0.0; num_qubits];
        for (index, amp) in self.state.iter() {
            let p = amp.norm_sqr();
            for (wire, total) in probabilities.iter_mut().enumerate() {
                if index & wire_mask(wire, num_qubits) != 0 {
                    *total += p;
                }
            }
        }
        probabilities.into_iter().map(round_probability).collect()
    }

    /// Collapse every wire by the majority rule without touching registers
    pub fn measure_all(&mut self) -> Result<Vec<u8>> {
        (0..self.state.num_qubits())
            .map(|wire| -> Result<u8> {
                let result = WireMeasurement::new(wire).measure(&self.state, &mut *self.random)?;
                Ok(result.outcome)
            })
            .collect()
    }

    /// Amplitude of one basis state
    pub fn amplitude(&self, index: u64) -> Complex64 {
        self.state.amplitude(index)
    }

    /// See [`SparseState::state_as_string`]
    pub fn state_as_string(&self, only_possible: bool) -> String {
        self.state.state_as_string(only_possible)
    }

    /// Value copy of the circuit, optionally flattened first
    pub fn save(&self, decompose: bool) -> Result<SerializedCircuit> {
        if decompose {
            Ok(Decomposer::new().decompose(&self.circuit)?.circuit.save())
        } else {
            Ok(self.circuit.save())
        }
    }

    /// Replace the circuit and reset the state
    pub fn load(&mut self, serialized: &SerializedCircuit) -> Result<()> {
        self.circuit = Circuit::load(serialized)?;
        self.statistics = None;
        self.reset_state()
    }
}

fn check_width(num_qubits: usize, config: &SimulatorConfig) -> Result<()> {
    if num_qubits > config.max_qubits {
        return Err(SimulatorError::TooManyQubits {
            num_qubits,
            max_qubits: config.max_qubits,
        });
    }
    Ok(())
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("circuit", &self.circuit)
            .field("state", &self.state)
            .field("config", &self.config)
            .field("statistics", &self.statistics)
            .finish_non_exhaustive()
    }
}
