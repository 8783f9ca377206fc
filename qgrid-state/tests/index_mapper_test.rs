//! Property tests for the index mapper and sparse application

use approx::assert_abs_diff_eq;
use num_complex::Complex64;
use proptest::prelude::*;
use qgrid_gates::{GateCatalog, GateMatrix};
use qgrid_state::{SparseState, SparseTransform};
use std::f64::consts::PI;

/// Distinct target wires, in random order, for a register of `n` wires
fn targets(n: usize, k: usize) -> impl Strategy<Value = Vec<usize>> {
    Just((0..n).collect::<Vec<_>>())
        .prop_shuffle()
        .prop_map(move |wires| wires[..k].to_vec())
}

fn register_and_targets(k: usize) -> impl Strategy<Value = (usize, Vec<usize>)> {
    (k..=5usize).prop_flat_map(move |n| (Just(n), targets(n, k)))
}

/// Reference entry: read the target bits of `row`/`col` in connector order
fn expected_entry(u: &GateMatrix, targets: &[usize], n: usize, row: u64, col: u64) -> Complex64 {
    let bit = |index: u64, wire: usize| (index >> (n - 1 - wire)) & 1;
    let spectators_agree = (0..n)
        .filter(|w| !targets.contains(w))
        .all(|w| bit(row, w) == bit(col, w));
    if !spectators_agree {
        return Complex64::new(0.0, 0.0);
    }
    let sub = |index: u64| {
        targets
            .iter()
            .fold(0usize, |acc, &w| (acc << 1) | bit(index, w) as usize)
    };
    u.get(sub(row), sub(col))
}

fn apply(state: &mut SparseState, u: &GateMatrix, targets: &[usize]) {
    let transform = SparseTransform::build(u, targets, state.num_qubits()).unwrap();
    state.apply(transform).unwrap();
}

proptest! {
    #[test]
    fn prop_transform_matches_reference(
        (n, wires) in register_and_targets(2),
        theta in 0.0..PI,
    ) {
        let u = GateCatalog::resolve("cu3", &[theta, 0.3, -1.1]).unwrap().unwrap();
        let transform = SparseTransform::build(&u, &wires, n).unwrap();
        for row in 0..(1u64 << n) {
            for col in 0..(1u64 << n) {
                let expected = expected_entry(&u, &wires, n, row, col);
                let actual = transform.get(row, col);
                prop_assert!((expected - actual).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn prop_entry_count_is_local((n, wires) in register_and_targets(3)) {
        let ccx = GateCatalog::lookup("ccx").unwrap();
        let transform = SparseTransform::build(&ccx, &wires, n).unwrap();
        let nnz = ccx.nonzero_entries().count();
        prop_assert_eq!(transform.num_entries(), nnz << (n - 3));
    }

    #[test]
    fn prop_gate_then_adjoint_restores_state(
        (n, wires) in register_and_targets(2),
        start in 0u64..32,
        theta in -PI..PI,
        phi in -PI..PI,
    ) {
        let start = start % (1 << n);
        let mut state = SparseState::new(n).unwrap();
        let x = GateCatalog::lookup("x").unwrap();
        for w in 0..n {
            if (start >> (n - 1 - w)) & 1 == 1 {
                apply(&mut state, &x, &[w]);
            }
        }
        prop_assert_eq!(state.amplitudes(), vec![(start, Complex64::new(1.0, 0.0))]);

        let h = GateCatalog::lookup("h").unwrap();
        apply(&mut state, &h, &wires[..1]);
        let u = GateCatalog::resolve("cu3", &[theta, phi, 0.7]).unwrap().unwrap();
        apply(&mut state, &u, &wires);
        assert_abs_diff_eq!(state.norm_sqr(), 1.0, epsilon = 1e-10);

        apply(&mut state, &u.adjoint(), &wires);
        apply(&mut state, &h, &wires[..1]);
        let amplitudes = state.amplitudes();
        prop_assert_eq!(amplitudes.len(), 1);
        prop_assert_eq!(amplitudes[0].0, start);
        assert_abs_diff_eq!(amplitudes[0].1.re, 1.0, epsilon = 1e-10);
    }
}

#[test]
fn test_ghz_stays_sparse() {
    let n = 12;
    let mut state = SparseState::new(n).unwrap();
    apply(&mut state, &GateCatalog::lookup("h").unwrap(), &[0]);
    let cx = GateCatalog::lookup("cx").unwrap();
    for w in 1..n {
        apply(&mut state, &cx, &[w - 1, w]);
        assert_eq!(state.num_amplitudes(), 2);
    }
    let all_ones = (1u64 << n) - 1;
    assert_abs_diff_eq!(state.amplitude(all_ones).norm_sqr(), 0.5, epsilon = 1e-12);
}

#[test]
fn test_swap_exchanges_wires() {
    let mut state = SparseState::new(3).unwrap();
    apply(&mut state, &GateCatalog::lookup("x").unwrap(), &[0]);
    apply(&mut state, &GateCatalog::lookup("swap").unwrap(), &[0, 2]);
    assert_eq!(state.amplitudes(), vec![(0b001, Complex64::new(1.0, 0.0))]);
}

#[test]
fn test_toffoli_truth_table() {
    let ccx = GateCatalog::lookup("ccx").unwrap();
    let x = GateCatalog::lookup("x").unwrap();
    for input in 0u64..8 {
        let mut state = SparseState::new(3).unwrap();
        for w in 0..3 {
            if (input >> (2 - w)) & 1 == 1 {
                apply(&mut state, &x, &[w]);
            }
        }
        // controls on wires 2 and 0, target wire 1
        apply(&mut state, &ccx, &[2, 0, 1]);
        let expected = if input & 0b101 == 0b101 {
            input ^ 0b010
        } else {
            input
        };
        assert_eq!(state.amplitudes(), vec![(expected, Complex64::new(1.0, 0.0))]);
    }
}
