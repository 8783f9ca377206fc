//! Execution statistics tracking

use std::time::Duration;

/// Execution statistics for one `run`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionStatistics {
    /// Total execution time
    pub total_time: Duration,

    /// Time spent flattening composite gates
    pub decomposition_time: Duration,

    /// Time spent building transforms and applying them
    pub gate_application_time: Duration,

    /// Time spent on measurements
    pub measurement_time: Duration,

    /// Number of unitaries applied, including the `x` gates for initial values
    pub gates_applied: usize,

    /// Gates skipped because they have no matrix
    pub unknown_gates_skipped: usize,

    /// Gates skipped because their classical condition did not hold
    pub conditional_skips: usize,

    /// Number of measurement placements executed
    pub measurements: usize,

    /// Decomposition passes over the top-level circuit
    pub decomposition_passes: usize,

    /// Composite placements replaced during decomposition
    pub splices: usize,

    /// Largest number of stored amplitudes seen after any gate
    pub peak_amplitudes: usize,
}

impl ExecutionStatistics {
    /// Create a new statistics object
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the gate execution rate (gates per second)
    pub fn gates_per_second(&self) -> f64 {
        let secs = self.gate_application_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.gates_applied as f64 / secs
        }
    }

    /// Number of placements that did not change the state
    pub fn total_skipped(&self) -> usize {
        self.unknown_gates_skipped + self.conditional_skips
    }
}

impl std::fmt::Display for ExecutionStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Execution Statistics:")?;
        writeln!(f, "  Total time: {:?}", self.total_time)?;
        writeln!(f, "    Decomposition: {:?}", self.decomposition_time)?;
        writeln!(f, "    Gate application: {:?}", self.gate_application_time)?;
        writeln!(f, "    Measurement: {:?}", self.measurement_time)?;

        writeln!(f, "\n  Gates:")?;
        writeln!(f, "    Applied: {}", self.gates_applied)?;
        writeln!(f, "    Skipped (unknown): {}", self.unknown_gates_skipped)?;
        writeln!(f, "    Skipped (condition): {}", self.conditional_skips)?;
        writeln!(f, "    Measurements: {}", self.measurements)?;
        writeln!(
            f,
            "    Decomposition: {} splices in {} passes",
            self.splices, self.decomposition_passes
        )?;
        writeln!(f, "    Execution rate: {:.0} gates/sec", self.gates_per_second())?;

        writeln!(f, "\n  State:")?;
        writeln!(f, "    Peak amplitudes: {}", self.peak_amplitudes)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates() {
        let stats = ExecutionStatistics {
            gate_application_time: Duration::from_millis(500),
            gates_applied: 100,
            unknown_gates_skipped: 2,
            conditional_skips: 3,
            ..Default::default()
        };
        assert_eq!(stats.gates_per_second(), 200.0);
        assert_eq!(stats.total_skipped(), 5);
        assert_eq!(ExecutionStatistics::new().gates_per_second(), 0.0);
    }

    #[test]
    fn test_display() {
        let stats = ExecutionStatistics {
            gates_applied: 4,
            peak_amplitudes: 2,
            ..Default::default()
        };
        let text = stats.to_string();
        assert!(text.contains("Applied: 4"));
        assert!(text.contains("Peak amplitudes: 2"));
    }
}
