//! Tests for every gate in the catalog

use approx::assert_relative_eq;
use num_complex::Complex64;
use proptest::prelude::*;
use qgrid_gates::matrices::*;
use qgrid_gates::{GateCatalog, GateMatrix};
use std::f64::consts::{FRAC_1_SQRT_2, PI};

const EPSILON: f64 = 1e-8;

fn resolve(name: &str, params: &[f64]) -> GateMatrix {
    GateCatalog::resolve(name, params)
        .unwrap()
        .unwrap_or_else(|| panic!("{} should be in the catalog", name))
}

// Checks the [[I, 0], [0, U]] block layout of a controlled matrix
fn assert_controlled_blocks(cu: &GateMatrix, u: &GateMatrix) {
    let m = u.dim();
    assert_eq!(cu.dim(), 2 * m);
    for i in 0..m {
        for j in 0..m {
            let identity = if i == j { 1.0 } else { 0.0 };
            assert_eq!(cu.get(i, j), Complex64::new(identity, 0.0));
            assert_eq!(cu.get(i, m + j), Complex64::new(0.0, 0.0));
            assert_eq!(cu.get(m + i, j), Complex64::new(0.0, 0.0));
            assert_eq!(cu.get(m + i, m + j), u.get(i, j));
        }
    }
}

// ============================================================================
// Fixed gates
// ============================================================================

#[test]
fn test_every_fixed_gate_is_unitary() {
    for name in qgrid_gates::catalog::FIXED_GATES {
        let gate = resolve(name, &[]);
        assert!(gate.is_unitary(EPSILON), "{} is not unitary", name);
    }
}

#[test]
fn test_every_controlled_fixed_gate() {
    for name in qgrid_gates::catalog::FIXED_GATES {
        let u = resolve(name, &[]);
        let cu = resolve(&format!("c{}", name), &[]);
        assert!(cu.is_unitary(EPSILON), "c{} is not unitary", name);
        assert_controlled_blocks(&cu, &u);
    }
}

#[test]
fn test_hadamard_entries() {
    let h = resolve("h", &[]);
    assert_relative_eq!(h.get(0, 0).re, FRAC_1_SQRT_2, epsilon = 1e-12);
    assert_relative_eq!(h.get(1, 1).re, -FRAC_1_SQRT_2, epsilon = 1e-12);
}

#[test]
fn test_sqrt_not_squares_to_x() {
    let srn = resolve("srn", &[]);
    let x = GateMatrix::from_rows(&PAULI_X);
    assert!(srn.multiply(&srn).max_deviation(&x) < EPSILON);

    let srndg = resolve("srndg", &[]);
    assert!(srn.multiply(&srndg).max_deviation(&GateMatrix::identity(2)) < EPSILON);
}

#[test]
fn test_sqrt_swap_squares_to_swap() {
    let srswap = resolve("srswap", &[]);
    let swap = GateMatrix::from_rows(&SWAP);
    assert!(srswap.multiply(&srswap).max_deviation(&swap) < EPSILON);
}

#[test]
fn test_phase_ladder() {
    // r8² = r4 = t, t² = r2 = s, s² = z
    let r8 = resolve("r8", &[]);
    let t = resolve("t", &[]);
    let s = resolve("s", &[]);
    let z = resolve("z", &[]);
    assert!(r8.multiply(&r8).max_deviation(&t) < EPSILON);
    assert!(t.multiply(&t).max_deviation(&s) < EPSILON);
    assert!(s.multiply(&s).max_deviation(&z) < EPSILON);
}

#[test]
fn test_daggers_invert() {
    for (gate, dagger) in [("s", "sdg"), ("t", "tdg")] {
        let product = resolve(gate, &[]).multiply(&resolve(dagger, &[]));
        assert!(product.max_deviation(&GateMatrix::identity(2)) < EPSILON);
    }
}

#[test]
fn test_toffoli_and_fredkin() {
    let ccx = resolve("ccx", &[]);
    assert_eq!(ccx.dim(), 8);
    assert_eq!(ccx.get(7, 6), Complex64::new(1.0, 0.0));
    assert_eq!(ccx.get(6, 6), Complex64::new(0.0, 0.0));

    let cswap = resolve("cswap", &[]);
    assert_eq!(cswap.get(5, 6), Complex64::new(1.0, 0.0));
    assert_eq!(cswap.get(6, 5), Complex64::new(1.0, 0.0));
    assert_eq!(cswap.get(3, 3), Complex64::new(1.0, 0.0));
}

// ============================================================================
// Parametrized gates
// ============================================================================

#[test]
fn test_u3_covers_known_gates() {
    let x = GateMatrix::from_rows(&PAULI_X);
    assert!(resolve("u3", &[PI, 0.0, PI]).max_deviation(&x) < EPSILON);

    let h = GateMatrix::from_rows(&HADAMARD);
    assert!(resolve("u2", &[0.0, PI]).max_deviation(&h) < EPSILON);

    let t = GateMatrix::from_rows(&T_GATE);
    assert!(resolve("u1", &[PI / 4.0]).max_deviation(&t) < EPSILON);
}

#[test]
fn test_rotation_by_zero_is_identity() {
    for name in ["rx", "ry", "rz"] {
        let gate = resolve(name, &[0.0]);
        assert!(gate.max_deviation(&GateMatrix::identity(2)) < EPSILON);
    }
}

#[test]
fn test_rx_pi_is_x_up_to_phase() {
    let rx = resolve("rx", &[PI]);
    assert_relative_eq!(rx.get(0, 1).im, -1.0, epsilon = 1e-12);
    assert_relative_eq!(rx.get(1, 0).im, -1.0, epsilon = 1e-12);
    assert!(rx.get(0, 0).norm() < 1e-12);
}

#[test]
fn test_missing_parameters_error() {
    assert!(GateCatalog::resolve("cu3", &[1.0]).is_err());
    assert!(GateCatalog::lookup("rx").is_none());
}

proptest! {
    #[test]
    fn prop_parametric_gates_unitary(
        a in -2.0 * PI..2.0 * PI,
        b in -2.0 * PI..2.0 * PI,
        c in -2.0 * PI..2.0 * PI,
    ) {
        let params = [a, b, c];
        for (name, count) in qgrid_gates::catalog::PARAMETRIC_GATES {
            let u = resolve(name, &params[..*count]);
            prop_assert!(u.is_unitary(EPSILON));

            let cu = resolve(&format!("c{}", name), &params[..*count]);
            prop_assert!(cu.is_unitary(EPSILON));
            assert_controlled_blocks(&cu, &u);
        }
    }

    #[test]
    fn prop_control_depth_doubles_dimension(depth in 0usize..4) {
        let name = format!("{}h", "c".repeat(depth));
        let gate = resolve(&name, &[]);
        prop_assert_eq!(gate.num_qubits(), depth + 1);
        prop_assert!(gate.is_unitary(EPSILON));
    }
}
