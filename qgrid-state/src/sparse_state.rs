//! Sparse quantum state representation
//!
//! Only basis states with a nonzero amplitude are stored, keyed by basis
//! index in an `AHashMap`. Circuits that stay close to a handful of
//! basis states (classical logic built from `x`/`cx`/`ccx`, GHZ-style
//! entanglers) never touch the other `2^n` entries.

use crate::error::{Result, StateError};
use crate::transform::SparseTransform;
use crate::MAX_QUBITS;
use ahash::AHashMap;
use num_complex::Complex64;
use std::fmt;

/// Magnitude below which a computed amplitude is dropped from the map
pub const AMPLITUDE_TOLERANCE: f64 = 1e-14;

/// Sparse state vector of an `n`-qubit register
///
/// # Example
///
/// ```
/// use qgrid_state::SparseState;
/// use num_complex::Complex64;
///
/// let state = SparseState::new(3).unwrap();
/// assert_eq!(state.num_qubits(), 3);
/// assert_eq!(state.amplitude(0), Complex64::new(1.0, 0.0)); // |000⟩
/// ```
#[derive(Clone)]
pub struct SparseState {
    num_qubits: usize,
    amplitudes: AHashMap<u64, Complex64>,
}

impl SparseState {
    /// Create a state initialized to |0...0⟩
    ///
    /// # Errors
    /// Returns `TooManyQubits` when `num_qubits` exceeds [`MAX_QUBITS`].
    pub fn new(num_qubits: usize) -> Result<Self> {
        if num_qubits > MAX_QUBITS {
            return Err(StateError::TooManyQubits {
                num_qubits,
                max: MAX_QUBITS,
            });
        }
        let mut state = Self {
            num_qubits,
            amplitudes: AHashMap::new(),
        };
        state.init_state();
        Ok(state)
    }

    /// Reset to the single entry `{0: 1+0i}`
    pub fn init_state(&mut self) {
        self.amplitudes.clear();
        self.amplitudes.insert(0, Complex64::new(1.0, 0.0));
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Dimension of the full Hilbert space (2^n)
    #[inline]
    pub fn dimension(&self) -> usize {
        1 << self.num_qubits
    }

    /// Number of stored (nonzero) amplitudes
    #[inline]
    pub fn num_amplitudes(&self) -> usize {
        self.amplitudes.len()
    }

    /// Amplitude of a basis state, zero when it is not stored
    #[inline]
    pub fn amplitude(&self, index: u64) -> Complex64 {
        self.amplitudes.get(&index).copied().unwrap_or_default()
    }

    /// Stored amplitudes sorted by basis index
    pub fn amplitudes(&self) -> Vec<(u64, Complex64)> {
        let mut entries: Vec<_> = self.amplitudes.iter().map(|(&i, &a)| (i, a)).collect();
        entries.sort_unstable_by_key(|&(i, _)| i);
        entries
    }

    /// Iterate stored amplitudes in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (u64, Complex64)> + '_ {
        self.amplitudes.iter().map(|(&i, &a)| (i, a))
    }

    /// Σ |amplitude|²
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.values().map(Complex64::norm_sqr).sum()
    }

    /// Replace the state by `transform · state`
    ///
    /// Each transform row sums `coef · amplitude` over the columns stored in
    /// both the row and the state; rows whose sum vanishes are not stored.
    /// The transform is consumed.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if the transform was built for a
    /// different register width.
    pub fn apply(&mut self, transform: SparseTransform) -> Result<()> {
        if transform.num_qubits() != self.num_qubits {
            return Err(StateError::DimensionMismatch {
                expected: self.num_qubits,
                actual: transform.num_qubits(),
            });
        }

        let mut next = AHashMap::with_capacity(self.amplitudes.len());
        for (row, entries) in transform.rows() {
            let mut sum = Complex64::new(0.0, 0.0);
            let mut touched = false;
            for &(col, coef) in entries {
                if let Some(&amp) = self.amplitudes.get(&col) {
                    sum += coef * amp;
                    touched = true;
                }
            }
            if touched && sum.norm() > AMPLITUDE_TOLERANCE {
                next.insert(row, sum);
            }
        }
        self.amplitudes = next;
        Ok(())
    }

    /// Full dense amplitude vector of length 2^n
    pub fn to_dense(&self) -> Vec<Complex64> {
        let mut dense = vec![Complex64::new(0.0, 0.0); self.dimension()];
        for (&i, &amp) in &self.amplitudes {
            dense[i as usize] = amp;
        }
        dense
    }

    /// Bitstring of a basis index, wire 0 first
    pub fn basis_label(&self, index: u64) -> String {
        if self.num_qubits == 0 {
            return String::new();
        }
        format!("{:0width$b}", index, width = self.num_qubits)
    }

    /// Human-readable listing, one basis state per line
    ///
    /// Each line reads `amplitude|bits>  probability%`. With
    /// `only_possible` set, basis states with zero amplitude are left out;
    /// otherwise all 2^n states are listed.
    pub fn state_as_string(&self, only_possible: bool) -> String {
        let mut out = String::new();
        if only_possible {
            for (index, amp) in self.amplitudes() {
                self.write_line(&mut out, index, amp);
            }
        } else {
            for index in 0..self.dimension() as u64 {
                self.write_line(&mut out, index, self.amplitude(index));
            }
        }
        out
    }

    fn write_line(&self, out: &mut String, index: u64, amp: Complex64) {
        use std::fmt::Write;
        let _ = writeln!(
            out,
            "{:+.8}{:+.8}i|{}>\t{:.5}%",
            amp.re,
            amp.im,
            self.basis_label(index),
            amp.norm_sqr() * 100.0
        );
    }
}

impl fmt::Debug for SparseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparseState")
            .field("num_qubits", &self.num_qubits)
            .field("num_amplitudes", &self.amplitudes.len())
            .finish()
    }
}

impl fmt::Display for SparseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state_as_string(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qgrid_gates::GateCatalog;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn apply(state: &mut SparseState, name: &str, targets: &[usize]) {
        let matrix = GateCatalog::lookup(name).unwrap();
        let transform = SparseTransform::build(&matrix, targets, state.num_qubits()).unwrap();
        state.apply(transform).unwrap();
    }

    #[test]
    fn test_new_state() {
        let state = SparseState::new(4).unwrap();
        assert_eq!(state.num_amplitudes(), 1);
        assert_eq!(state.amplitude(0), Complex64::new(1.0, 0.0));
        assert_eq!(state.amplitude(5), Complex64::new(0.0, 0.0));
        assert!(SparseState::new(31).is_err());
    }

    #[test]
    fn test_x_sets_msb_for_wire_zero() {
        let mut state = SparseState::new(3).unwrap();
        apply(&mut state, "x", &[0]);
        assert_eq!(state.amplitudes(), vec![(0b100, Complex64::new(1.0, 0.0))]);
        assert_eq!(state.basis_label(0b100), "100");
    }

    #[test]
    fn test_double_x_restores_exactly() {
        let mut state = SparseState::new(2).unwrap();
        apply(&mut state, "x", &[1]);
        apply(&mut state, "x", &[1]);
        assert_eq!(state.amplitudes(), vec![(0, Complex64::new(1.0, 0.0))]);
    }

    #[test]
    fn test_hadamard_superposition() {
        let mut state = SparseState::new(1).unwrap();
        apply(&mut state, "h", &[0]);
        assert_eq!(state.num_amplitudes(), 2);
        assert_relative_eq!(state.amplitude(0).re, FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_relative_eq!(state.amplitude(1).re, FRAC_1_SQRT_2, epsilon = 1e-12);

        // interference removes |1⟩ entirely
        apply(&mut state, "h", &[0]);
        assert_eq!(state.num_amplitudes(), 1);
        assert_relative_eq!(state.amplitude(0).re, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_apply_rejects_width_mismatch() {
        let mut state = SparseState::new(2).unwrap();
        let x = GateCatalog::lookup("x").unwrap();
        let transform = SparseTransform::build(&x, &[0], 3).unwrap();
        assert!(matches!(
            state.apply(transform),
            Err(StateError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_to_dense() {
        let mut state = SparseState::new(2).unwrap();
        apply(&mut state, "x", &[1]);
        let dense = state.to_dense();
        assert_eq!(dense.len(), 4);
        assert_eq!(dense[1], Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_state_as_string() {
        let mut state = SparseState::new(2).unwrap();
        apply(&mut state, "x", &[0]);
        let only = state.state_as_string(true);
        assert_eq!(only.lines().count(), 1);
        assert!(only.contains("|10>"));
        assert!(only.contains("100.00000%"));
        assert_eq!(state.state_as_string(false).lines().count(), 4);
    }

    #[test]
    fn test_init_state_resets() {
        let mut state = SparseState::new(2).unwrap();
        apply(&mut state, "h", &[0]);
        state.init_state();
        assert_eq!(state.amplitudes(), vec![(0, Complex64::new(1.0, 0.0))]);
    }
}
