//! Constant gate matrices
//!
//! Row-major 2×2 and 4×4 unitaries for the fixed primitives, plus the
//! angle-parametrized single-qubit families.

use num_complex::Complex64;

// Compile-time constant helpers
const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const NEG_I: Complex64 = Complex64::new(0.0, -1.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

const INV_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;
const HALF_PLUS: Complex64 = Complex64::new(0.5, 0.5); // (1+i)/2
const HALF_MINUS: Complex64 = Complex64::new(0.5, -0.5); // (1-i)/2

// cos(π/8), sin(π/8)
const COS_PI_8: f64 = 0.923_879_532_511_286_7;
const SIN_PI_8: f64 = 0.382_683_432_365_089_8;

// Single-qubit gate matrices (2x2)

/// Identity
pub const IDENTITY: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, ONE]];

/// Hadamard
/// H = 1/√2 * [[1,  1],
///             [1, -1]]
pub const HADAMARD: [[Complex64; 2]; 2] = [
    [Complex64::new(INV_SQRT2, 0.0), Complex64::new(INV_SQRT2, 0.0)],
    [Complex64::new(INV_SQRT2, 0.0), Complex64::new(-INV_SQRT2, 0.0)],
];

/// Pauli-X (NOT)
pub const PAULI_X: [[Complex64; 2]; 2] = [[ZERO, ONE], [ONE, ZERO]];

/// Pauli-Y
pub const PAULI_Y: [[Complex64; 2]; 2] = [[ZERO, NEG_I], [I, ZERO]];

/// Pauli-Z
pub const PAULI_Z: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, NEG_ONE]];

/// S = diag(1, i); also R2 = diag(1, e^(iπ/2))
pub const S_GATE: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, I]];

/// S† = diag(1, -i)
pub const S_GATE_DAGGER: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, NEG_I]];

/// T = diag(1, e^(iπ/4)); also R4
pub const T_GATE: [[Complex64; 2]; 2] = [
    [ONE, ZERO],
    [ZERO, Complex64::new(INV_SQRT2, INV_SQRT2)],
];

/// T† = diag(1, e^(-iπ/4))
pub const T_GATE_DAGGER: [[Complex64; 2]; 2] = [
    [ONE, ZERO],
    [ZERO, Complex64::new(INV_SQRT2, -INV_SQRT2)],
];

/// R8 = diag(1, e^(iπ/8))
pub const R8_GATE: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, Complex64::new(COS_PI_8, SIN_PI_8)]];

/// √NOT
/// SRN = 1/2 * [[1+i, 1-i],
///              [1-i, 1+i]]
pub const SQRT_NOT: [[Complex64; 2]; 2] = [[HALF_PLUS, HALF_MINUS], [HALF_MINUS, HALF_PLUS]];

/// √NOT†
pub const SQRT_NOT_DAGGER: [[Complex64; 2]; 2] = [[HALF_MINUS, HALF_PLUS], [HALF_PLUS, HALF_MINUS]];

// Two-qubit gate matrices (4x4)

/// SWAP
pub const SWAP: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ONE, ZERO],
    [ZERO, ONE, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE],
];

/// √SWAP
/// SRSWAP = [[1, 0,        0,        0],
///           [0, (1+i)/2,  (1-i)/2,  0],
///           [0, (1-i)/2,  (1+i)/2,  0],
///           [0, 0,        0,        1]]
pub const SQRT_SWAP: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, HALF_PLUS, HALF_MINUS, ZERO],
    [ZERO, HALF_MINUS, HALF_PLUS, ZERO],
    [ZERO, ZERO, ZERO, ONE],
];

/// CNOT with the control on the leading (most significant) qubit
pub const CNOT: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ONE, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE],
    [ZERO, ZERO, ONE, ZERO],
];

// Parametrized single-qubit matrices

/// RX(θ) = [[cos(θ/2),    -i·sin(θ/2)],
///          [-i·sin(θ/2),  cos(θ/2)  ]]
#[inline]
pub fn rotation_x(theta: f64) -> [[Complex64; 2]; 2] {
    let (sin_val, cos_val) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(cos_val, 0.0), Complex64::new(0.0, -sin_val)],
        [Complex64::new(0.0, -sin_val), Complex64::new(cos_val, 0.0)],
    ]
}

/// RY(θ) = [[cos(θ/2), -sin(θ/2)],
///          [sin(θ/2),  cos(θ/2)]]
#[inline]
pub fn rotation_y(theta: f64) -> [[Complex64; 2]; 2] {
    let (sin_val, cos_val) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(cos_val, 0.0), Complex64::new(-sin_val, 0.0)],
        [Complex64::new(sin_val, 0.0), Complex64::new(cos_val, 0.0)],
    ]
}

/// RZ(θ) = diag(e^(-iθ/2), e^(iθ/2))
#[inline]
pub fn rotation_z(theta: f64) -> [[Complex64; 2]; 2] {
    let half_theta = theta / 2.0;
    [
        [Complex64::from_polar(1.0, -half_theta), ZERO],
        [ZERO, Complex64::from_polar(1.0, half_theta)],
    ]
}

/// U1(λ) = diag(1, e^(iλ))
#[inline]
pub fn u1(lambda: f64) -> [[Complex64; 2]; 2] {
    [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, lambda)]]
}

/// U2(φ,λ) = 1/√2 * [[1,       -e^(iλ)    ],
///                   [e^(iφ),   e^(i(φ+λ))]]
#[inline]
pub fn u2(phi: f64, lambda: f64) -> [[Complex64; 2]; 2] {
    [
        [
            Complex64::new(INV_SQRT2, 0.0),
            -Complex64::from_polar(INV_SQRT2, lambda),
        ],
        [
            Complex64::from_polar(INV_SQRT2, phi),
            Complex64::from_polar(INV_SQRT2, phi + lambda),
        ],
    ]
}

/// U3(θ,φ,λ) = [[cos(θ/2),         -e^(iλ)·sin(θ/2)    ],
///              [e^(iφ)·sin(θ/2),   e^(i(φ+λ))·cos(θ/2)]]
#[inline]
pub fn u3(theta: f64, phi: f64, lambda: f64) -> [[Complex64; 2]; 2] {
    let (sin_val, cos_val) = (theta / 2.0).sin_cos();
    [
        [
            Complex64::new(cos_val, 0.0),
            -Complex64::from_polar(sin_val, lambda),
        ],
        [
            Complex64::from_polar(sin_val, phi),
            Complex64::from_polar(cos_val, phi + lambda),
        ],
    ]
}
