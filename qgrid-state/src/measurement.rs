//! Single-wire measurement
//!
//! Measurement here is a majority rule, not a projective sample: the
//! probability of reading 1 is rounded to five decimals, and the outcome
//! is 1 above 0.5, 0 below it, and a fair coin flip at exactly 0.5. The
//! quantum state is left untouched; only the classical result collapses.

use crate::error::{Result, StateError};
use crate::sparse_state::SparseState;
use crate::transform::wire_mask;

/// Number of decimals kept in a measured probability
pub const PROBABILITY_DECIMALS: i32 = 5;

/// Round a probability to [`PROBABILITY_DECIMALS`] decimals
#[inline]
pub fn round_probability(p: f64) -> f64 {
    let scale = 10f64.powi(PROBABILITY_DECIMALS);
    (p * scale).round() / scale
}

/// Result of measuring one wire
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementResult {
    /// Wire that was measured
    pub wire: usize,

    /// Rounded probability of reading 1
    pub probability: f64,

    /// Collapsed classical value (0 or 1)
    pub outcome: u8,
}

impl MeasurementResult {
    #[inline]
    pub fn as_bool(&self) -> bool {
        self.outcome == 1
    }
}

/// Measurement of a single wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireMeasurement {
    pub wire: usize,
}

impl WireMeasurement {
    pub fn new(wire: usize) -> Self {
        Self { wire }
    }

    /// Rounded probability that the wire reads 1
    ///
    /// # Errors
    /// Returns `InvalidQubitIndex` if the wire is outside the register.
    pub fn probability(&self, state: &SparseState) -> Result<f64> {
        let num_qubits = state.num_qubits();
        if self.wire >= num_qubits {
            return Err(StateError::InvalidQubitIndex {
                index: self.wire,
                num_qubits,
            });
        }
        let mask = wire_mask(self.wire, num_qubits);
        let p: f64 = state
            .iter()
            .filter(|(index, _)| index & mask != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum();
        Ok(round_probability(p))
    }

    /// Collapse the wire to a classical bit
    ///
    /// `rng` yields uniform values in `[0, 1)` and is drawn only when the
    /// rounded probability is exactly 0.5; a draw below 0.5 reads as 1.
    ///
    /// # Example
    /// ```
    /// use qgrid_state::{SparseState, WireMeasurement};
    ///
    /// let state = SparseState::new(1).unwrap();
    /// let mut never_called = || -> f64 { unreachable!() };
    /// let result = WireMeasurement::new(0).measure(&state, &mut never_called).unwrap();
    /// assert_eq!(result.outcome, 0);
    /// ```
    pub fn measure(
        &self,
        state: &SparseState,
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<MeasurementResult> {
        let probability = self.probability(state)?;
        let outcome = if probability == 0.5 {
            u8::from(rng() < 0.5)
        } else {
            u8::from(probability > 0.5)
        };
        Ok(MeasurementResult {
            wire: self.wire,
            probability,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SparseTransform;
    use qgrid_gates::GateCatalog;

    fn apply(state: &mut SparseState, name: &str, params: &[f64], targets: &[usize]) {
        let matrix = GateCatalog::resolve(name, params).unwrap().unwrap();
        let transform = SparseTransform::build(&matrix, targets, state.num_qubits()).unwrap();
        state.apply(transform).unwrap();
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_probability(0.4999999999), 0.5);
        assert_eq!(round_probability(0.123456), 0.12346);
        assert_eq!(round_probability(1.0), 1.0);
    }

    #[test]
    fn test_basis_state_is_deterministic() {
        let mut state = SparseState::new(2).unwrap();
        apply(&mut state, "x", &[], &[1]);
        let mut rng = || -> f64 { panic!("coin must not be flipped") };
        let m1 = WireMeasurement::new(1).measure(&state, &mut rng).unwrap();
        assert_eq!(m1.outcome, 1);
        assert_eq!(m1.probability, 1.0);
        let m0 = WireMeasurement::new(0).measure(&state, &mut rng).unwrap();
        assert_eq!(m0.outcome, 0);
    }

    #[test]
    fn test_majority_rule() {
        // ry(θ) puts sin²(θ/2) on |1⟩; θ = 2.0 gives ~0.708
        let mut state = SparseState::new(1).unwrap();
        apply(&mut state, "ry", &[2.0], &[0]);
        let mut rng = || -> f64 { panic!("coin must not be flipped") };
        let result = WireMeasurement::new(0).measure(&state, &mut rng).unwrap();
        assert!(result.probability > 0.5 && result.probability < 1.0);
        assert_eq!(result.outcome, 1);
    }

    #[test]
    fn test_coin_flip_at_half() {
        let mut state = SparseState::new(1).unwrap();
        apply(&mut state, "h", &[], &[0]);
        let measurement = WireMeasurement::new(0);

        let mut low = || 0.1;
        let result = measurement.measure(&state, &mut low).unwrap();
        assert_eq!(result.probability, 0.5);
        assert_eq!(result.outcome, 1);

        let mut high = || 0.9;
        assert_eq!(measurement.measure(&state, &mut high).unwrap().outcome, 0);
    }

    #[test]
    fn test_state_is_not_collapsed() {
        let mut state = SparseState::new(1).unwrap();
        apply(&mut state, "h", &[], &[0]);
        let before = state.clone();
        let mut rng = || 0.0;
        WireMeasurement::new(0).measure(&state, &mut rng).unwrap();
        assert_eq!(before.amplitudes(), state.amplitudes());
    }

    #[test]
    fn test_wire_out_of_range() {
        let state = SparseState::new(2).unwrap();
        assert!(matches!(
            WireMeasurement::new(2).probability(&state),
            Err(StateError::InvalidQubitIndex { index: 2, .. })
        ));
    }
}
