//! Gate catalog: name → unitary
//!
//! Fixed primitives come from [`crate::matrices`]; the rotation and `u*`
//! families take angle parameters. Any number of leading `c` characters
//! adds that many control wires in front of the base gate, so `cx`,
//! `ccx`, `cswap` and `cu1` all resolve without their own table entries.

use crate::error::{GateError, Result};
use crate::matrices;
use crate::matrix::GateMatrix;

/// Base names of the fixed (parameterless) primitives
pub const FIXED_GATES: &[&str] = &[
    "id", "x", "y", "z", "h", "s", "t", "sdg", "tdg", "srn", "srndg", "r2", "r4", "r8", "swap",
    "srswap",
];

/// Base names of the parametrized primitives with their parameter counts
pub const PARAMETRIC_GATES: &[(&str, usize)] = &[
    ("u1", 1),
    ("u2", 2),
    ("u3", 3),
    ("rx", 1),
    ("ry", 1),
    ("rz", 1),
];

/// Static gate matrix lookup
///
/// # Example
/// ```
/// use qgrid_gates::GateCatalog;
///
/// let ccx = GateCatalog::lookup("ccx").unwrap();
/// assert_eq!(ccx.dim(), 8);
/// assert!(GateCatalog::lookup("majority").is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GateCatalog;

impl GateCatalog {
    /// Matrix of a parameterless gate, or `None` if the name is not a primitive
    pub fn lookup(name: &str) -> Option<GateMatrix> {
        Self::resolve(name, &[]).ok().flatten()
    }

    /// Matrix of a gate with angle parameters
    ///
    /// Unknown names are `Ok(None)`; a known name with the wrong number
    /// of parameters is an error.
    pub fn resolve(name: &str, params: &[f64]) -> Result<Option<GateMatrix>> {
        let (controls, base) = split_controls(name);
        let matrix = match fixed_matrix(base) {
            Some(matrix) => {
                if !params.is_empty() {
                    return Err(GateError::InvalidParameterCount {
                        gate: name.to_string(),
                        expected: 0,
                        actual: params.len(),
                    });
                }
                matrix
            }
            None => match parametric_matrix(name, base, params)? {
                Some(matrix) => matrix,
                None => return Ok(None),
            },
        };
        Ok(Some((0..controls).fold(matrix, |m, _| m.controlled())))
    }

    /// Whether `name` resolves to a catalog gate (ignoring parameters)
    pub fn is_primitive(name: &str) -> bool {
        let (_, base) = split_controls(name);
        FIXED_GATES.contains(&base) || PARAMETRIC_GATES.iter().any(|(n, _)| *n == base)
    }

    /// Number of angle parameters `name` expects, if it is a catalog gate
    pub fn parameter_count(name: &str) -> Option<usize> {
        let (_, base) = split_controls(name);
        if FIXED_GATES.contains(&base) {
            return Some(0);
        }
        PARAMETRIC_GATES
            .iter()
            .find(|(n, _)| *n == base)
            .map(|&(_, count)| count)
    }

    /// All base gate names (without control prefixes)
    pub fn names() -> impl Iterator<Item = &'static str> {
        FIXED_GATES
            .iter()
            .copied()
            .chain(PARAMETRIC_GATES.iter().map(|&(n, _)| n))
    }
}

fn split_controls(name: &str) -> (usize, &str) {
    let controls = name.bytes().take_while(|&b| b == b'c').count();
    (controls, &name[controls..])
}

fn fixed_matrix(base: &str) -> Option<GateMatrix> {
    let matrix = match base {
        "id" => GateMatrix::from_rows(&matrices::IDENTITY),
        "x" => GateMatrix::from_rows(&matrices::PAULI_X),
        "y" => GateMatrix::from_rows(&matrices::PAULI_Y),
        "z" => GateMatrix::from_rows(&matrices::PAULI_Z),
        "h" => GateMatrix::from_rows(&matrices::HADAMARD),
        "s" | "r2" => GateMatrix::from_rows(&matrices::S_GATE),
        "t" | "r4" => GateMatrix::from_rows(&matrices::T_GATE),
        "sdg" => GateMatrix::from_rows(&matrices::S_GATE_DAGGER),
        "tdg" => GateMatrix::from_rows(&matrices::T_GATE_DAGGER),
        "r8" => GateMatrix::from_rows(&matrices::R8_GATE),
        "srn" => GateMatrix::from_rows(&matrices::SQRT_NOT),
        "srndg" => GateMatrix::from_rows(&matrices::SQRT_NOT_DAGGER),
        "swap" => GateMatrix::from_rows(&matrices::SWAP),
        "srswap" => GateMatrix::from_rows(&matrices::SQRT_SWAP),
        _ => return None,
    };
    Some(matrix)
}

fn parametric_matrix(name: &str, base: &str, params: &[f64]) -> Result<Option<GateMatrix>> {
    let Some(&(_, expected)) = PARAMETRIC_GATES.iter().find(|(n, _)| *n == base) else {
        return Ok(None);
    };
    if params.len() != expected {
        return Err(GateError::InvalidParameterCount {
            gate: name.to_string(),
            expected,
            actual: params.len(),
        });
    }
    let rows = match base {
        "u1" => matrices::u1(params[0]),
        "u2" => matrices::u2(params[0], params[1]),
        "u3" => matrices::u3(params[0], params[1], params[2]),
        "rx" => matrices::rotation_x(params[0]),
        "ry" => matrices::rotation_y(params[0]),
        "rz" => matrices::rotation_z(params[0]),
        _ => return Ok(None),
    };
    Ok(Some(GateMatrix::from_rows(&rows)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_prefixes() {
        assert_eq!(split_controls("ccx"), (2, "x"));
        assert_eq!(split_controls("cswap"), (1, "swap"));
        assert_eq!(split_controls("h"), (0, "h"));
    }

    #[test]
    fn test_fixed_lookup() {
        assert_eq!(GateCatalog::lookup("h").unwrap().dim(), 2);
        assert_eq!(GateCatalog::lookup("cswap").unwrap().dim(), 8);
        assert_eq!(GateCatalog::lookup("csrswap").unwrap().num_qubits(), 3);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(GateCatalog::lookup("r2"), GateCatalog::lookup("s"));
        assert_eq!(GateCatalog::lookup("r4"), GateCatalog::lookup("t"));
    }

    #[test]
    fn test_unknown_name_is_none() {
        assert!(GateCatalog::lookup("majority").is_none());
        assert!(GateCatalog::lookup("").is_none());
        assert!(GateCatalog::lookup("c").is_none());
        assert_eq!(GateCatalog::resolve("adder", &[1.0]), Ok(None));
    }

    #[test]
    fn test_parameter_count_checked() {
        assert!(GateCatalog::resolve("rx", &[]).is_err());
        assert!(GateCatalog::resolve("u3", &[0.1, 0.2]).is_err());
        assert!(GateCatalog::resolve("h", &[0.1]).is_err());
        assert!(GateCatalog::resolve("cu1", &[0.3]).unwrap().is_some());
    }

    #[test]
    fn test_is_primitive() {
        assert!(GateCatalog::is_primitive("ccx"));
        assert!(GateCatalog::is_primitive("crz"));
        assert!(!GateCatalog::is_primitive("measure"));
        assert!(!GateCatalog::is_primitive("majority"));
        assert_eq!(GateCatalog::parameter_count("cu3"), Some(3));
        assert_eq!(GateCatalog::parameter_count("swap"), Some(0));
    }
}
