//! Simulator configuration

use qgrid_state::MAX_QUBITS;

/// What `run` does with a placement that is neither a catalog gate, a
/// measurement, nor a decomposable composite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownGatePolicy {
    /// Log a warning and continue with the next gate
    #[default]
    Skip,
    /// Abort the run with `SimulatorError::UnknownGate`
    Fail,
}

/// Configuration for the simulator
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Seed for the coin flip used when a measured probability is exactly 0.5
    ///
    /// If None, the generator is seeded from system entropy.
    ///
    /// Default: None
    pub seed: Option<u64>,

    /// Widest circuit `run` accepts
    ///
    /// Every gate application materialises a transform over the whole
    /// register; lower this to refuse wide circuits up front.
    ///
    /// Default: [`MAX_QUBITS`] (30)
    pub max_qubits: usize,

    /// Handling of gates without a matrix or definition
    ///
    /// Default: [`UnknownGatePolicy::Skip`]
    pub unknown_gates: UnknownGatePolicy,

    /// Enable execution statistics collection
    ///
    /// Default: false
    pub collect_statistics: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_qubits: MAX_QUBITS,
            unknown_gates: UnknownGatePolicy::Skip,
            collect_statistics: false,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeded configuration for reproducible runs
    pub fn deterministic(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Configuration that refuses unknown gates and records statistics
    pub fn strict() -> Self {
        Self {
            unknown_gates: UnknownGatePolicy::Fail,
            collect_statistics: true,
            ..Default::default()
        }
    }

    /// Set the random seed for deterministic execution
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    pub fn with_unknown_gates(mut self, policy: UnknownGatePolicy) -> Self {
        self.unknown_gates = policy;
        self
    }

    /// Enable statistics collection
    pub fn with_statistics(mut self, enabled: bool) -> Self {
        self.collect_statistics = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_qubits == 0 {
            return Err("max_qubits must be > 0".to_string());
        }
        if self.max_qubits > MAX_QUBITS {
            return Err(format!(
                "max_qubits must be at most {}, got {}",
                MAX_QUBITS, self.max_qubits
            ));
        }
        Ok(())
    }
}
