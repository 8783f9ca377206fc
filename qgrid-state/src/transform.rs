//! Index mapper: gate matrix → full-register sparse transform
//!
//! A `k`-wire gate `U` acting on an `n`-qubit register becomes the sparse
//! `2^n × 2^n` operator `I ⊗ U` permuted onto the target wires. Only
//! nonzero entries are stored, so a `k`-local gate produces at most
//! `2^(n-k) · nnz(U)` entries.
//!
//! Bit convention: wire `w` is bit `n-1-w` of a basis index, and
//! connector 0 is the most significant bit of the gate-local sub-index.

use crate::error::{Result, StateError};
use crate::MAX_QUBITS;
use ahash::AHashMap;
use num_complex::Complex64;
use qgrid_gates::GateMatrix;
use smallvec::SmallVec;

/// Bit of the basis index that holds `wire` in an `num_qubits`-wire register
#[inline]
pub fn wire_mask(wire: usize, num_qubits: usize) -> u64 {
    debug_assert!(wire < num_qubits);
    1u64 << (num_qubits - 1 - wire)
}

/// Spread the low bits of `value` over `masks`: bit `i` of `value` lands
/// on `masks[i]`.
#[inline]
fn deposit(value: u64, masks: &[u64]) -> u64 {
    masks
        .iter()
        .enumerate()
        .filter(|(i, _)| (value >> i) & 1 == 1)
        .fold(0, |acc, (_, &mask)| acc | mask)
}

type Row = SmallVec<[(u64, Complex64); 4]>;

/// Sparse operator over the full register, keyed by row index
///
/// Built fresh for each gate application and consumed by
/// [`SparseState::apply`](crate::SparseState::apply).
#[derive(Clone, Debug)]
pub struct SparseTransform {
    num_qubits: usize,
    rows: AHashMap<u64, Row>,
}

impl SparseTransform {
    /// Build the transform of `matrix` applied to `targets` (connector order)
    ///
    /// # Errors
    /// - `TooManyQubits` if `num_qubits` exceeds [`MAX_QUBITS`]
    /// - `InvalidQubitIndex` if a target is not below `num_qubits`
    /// - `DuplicateTarget` if a wire is listed twice
    /// - `DimensionMismatch` if `matrix` is not `2^targets.len()` wide
    ///
    /// # Example
    /// ```
    /// use qgrid_gates::GateCatalog;
    /// use qgrid_state::SparseTransform;
    ///
    /// let x = GateCatalog::lookup("x").unwrap();
    /// let t = SparseTransform::build(&x, &[1], 2).unwrap();
    /// // |00> → |01>, wire 1 is the low bit
    /// assert_eq!(t.get(0b01, 0b00).re, 1.0);
    /// assert_eq!(t.num_entries(), 4);
    /// ```
    pub fn build(matrix: &GateMatrix, targets: &[usize], num_qubits: usize) -> Result<Self> {
        if num_qubits > MAX_QUBITS {
            return Err(StateError::TooManyQubits {
                num_qubits,
                max: MAX_QUBITS,
            });
        }
        for (i, &wire) in targets.iter().enumerate() {
            if wire >= num_qubits {
                return Err(StateError::InvalidQubitIndex {
                    index: wire,
                    num_qubits,
                });
            }
            if targets[..i].contains(&wire) {
                return Err(StateError::DuplicateTarget { wire });
            }
        }
        let k = targets.len();
        if matrix.dim() != 1 << k {
            return Err(StateError::DimensionMismatch {
                expected: 1 << k,
                actual: matrix.dim(),
            });
        }

        // Connector 0 is the top bit of the sub-index, so reverse the
        // target order when depositing sub-index bits.
        let target_masks: SmallVec<[u64; 4]> = targets
            .iter()
            .rev()
            .map(|&w| wire_mask(w, num_qubits))
            .collect();
        let spectator_masks: Vec<u64> = (0..num_qubits)
            .filter(|w| !targets.contains(w))
            .map(|w| wire_mask(w, num_qubits))
            .collect();

        let entries: Vec<(u64, u64, Complex64)> = matrix
            .nonzero_entries()
            .map(|(a, b, coef)| {
                (
                    deposit(a as u64, &target_masks),
                    deposit(b as u64, &target_masks),
                    coef,
                )
            })
            .collect();

        let num_spectator_states = 1u64 << spectator_masks.len();
        let mut rows: AHashMap<u64, Row> =
            AHashMap::with_capacity((num_spectator_states as usize) << k);
        for s in 0..num_spectator_states {
            let base = deposit(s, &spectator_masks);
            for &(row, col, coef) in &entries {
                rows.entry(base | row).or_default().push((base | col, coef));
            }
        }

        Ok(Self { num_qubits, rows })
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of rows with at least one stored entry
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Total number of stored (nonzero) entries
    pub fn num_entries(&self) -> usize {
        self.rows.values().map(SmallVec::len).sum()
    }

    /// Entry at `(row, col)`, zero when absent
    pub fn get(&self, row: u64, col: u64) -> Complex64 {
        self.rows
            .get(&row)
            .and_then(|entries| entries.iter().find(|(c, _)| *c == col))
            .map(|&(_, coef)| coef)
            .unwrap_or_default()
    }

    /// Rows with their `(col, coef)` entries, in no particular order
    pub(crate) fn rows(&self) -> impl Iterator<Item = (u64, &[(u64, Complex64)])> {
        self.rows.iter().map(|(&row, entries)| (row, entries.as_slice()))
    }
}
