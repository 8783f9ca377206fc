//! Dense gate matrices
//!
//! [`GateMatrix`] is a square, row-major matrix whose dimension is a power
//! of two. Row/column index bits are read with the gate's first wire
//! (connector 0) as the most significant bit.

use num_complex::Complex64;
use std::fmt;

/// Magnitude below which a matrix entry is treated as zero
pub const ENTRY_TOLERANCE: f64 = 1e-14;

/// Dense unitary for a gate acting on `num_qubits()` wires
#[derive(Clone, Debug, PartialEq)]
pub struct GateMatrix {
    dim: usize,
    data: Vec<Complex64>,
}

impl GateMatrix {
    /// Build from fixed-size rows
    ///
    /// # Panics
    /// Panics if `N` is not a power of two.
    pub fn from_rows<const N: usize>(rows: &[[Complex64; N]; N]) -> Self {
        assert!(N.is_power_of_two(), "Matrix dimension must be a power of 2");
        Self {
            dim: N,
            data: rows.iter().flatten().copied().collect(),
        }
    }

    /// Build from a flattened row-major vector
    ///
    /// Returns `None` if the length is not the square of a power of two.
    pub fn from_vec(data: Vec<Complex64>) -> Option<Self> {
        let dim = (data.len() as f64).sqrt() as usize;
        if dim == 0 || dim * dim != data.len() || !dim.is_power_of_two() {
            return None;
        }
        Some(Self { dim, data })
    }

    /// Identity of dimension `dim`
    ///
    /// # Panics
    /// Panics if `dim` is not a power of two.
    pub fn identity(dim: usize) -> Self {
        assert!(dim.is_power_of_two(), "Matrix dimension must be a power of 2");
        let mut data = vec![Complex64::new(0.0, 0.0); dim * dim];
        for i in 0..dim {
            data[i * dim + i] = Complex64::new(1.0, 0.0);
        }
        Self { dim, data }
    }

    /// Matrix dimension (2^k)
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of wires the matrix acts on (k)
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.dim.trailing_zeros() as usize
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.dim + col]
    }

    /// Flattened row-major entries
    #[inline]
    pub fn as_slice(&self) -> &[Complex64] {
        &self.data
    }

    /// Controlled version of this gate
    ///
    /// The result acts on one more wire, placed first: it is the block
    /// matrix `[[I, 0], [0, U]]`, identity where the control is 0 and `U`
    /// where it is 1.
    pub fn controlled(&self) -> Self {
        let m = self.dim;
        let dim = 2 * m;
        let mut data = vec![Complex64::new(0.0, 0.0); dim * dim];
        for i in 0..m {
            data[i * dim + i] = Complex64::new(1.0, 0.0);
            for j in 0..m {
                data[(m + i) * dim + (m + j)] = self.data[i * m + j];
            }
        }
        Self { dim, data }
    }

    /// Conjugate transpose
    pub fn adjoint(&self) -> Self {
        let n = self.dim;
        let mut data = vec![Complex64::new(0.0, 0.0); n * n];
        for i in 0..n {
            for j in 0..n {
                data[j * n + i] = self.data[i * n + j].conj();
            }
        }
        Self { dim: n, data }
    }

    /// Matrix product `self · other`
    ///
    /// # Panics
    /// Panics if the dimensions differ.
    pub fn multiply(&self, other: &GateMatrix) -> Self {
        assert_eq!(self.dim, other.dim, "Matrix dimensions must match");
        let n = self.dim;
        let mut data = vec![Complex64::new(0.0, 0.0); n * n];
        for i in 0..n {
            for k in 0..n {
                let a = self.data[i * n + k];
                if a == Complex64::new(0.0, 0.0) {
                    continue;
                }
                for j in 0..n {
                    data[i * n + j] += a * other.data[k * n + j];
                }
            }
        }
        Self { dim: n, data }
    }

    /// Largest entry-wise distance to `other`
    pub fn max_deviation(&self, other: &GateMatrix) -> f64 {
        assert_eq!(self.dim, other.dim, "Matrix dimensions must match");
        self.data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b).norm())
            .fold(0.0, f64::max)
    }

    /// Check `U·U† = I` within `tolerance`
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        self.multiply(&self.adjoint())
            .max_deviation(&GateMatrix::identity(self.dim))
            <= tolerance
    }

    /// Entries whose magnitude exceeds [`ENTRY_TOLERANCE`], as `(row, col, value)`
    pub fn nonzero_entries(&self) -> impl Iterator<Item = (usize, usize, Complex64)> + '_ {
        let n = self.dim;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, v)| v.norm() > ENTRY_TOLERANCE)
            .map(move |(idx, &v)| (idx / n, idx % n, v))
    }
}

impl<const N: usize> From<[[Complex64; N]; N]> for GateMatrix {
    fn from(rows: [[Complex64; N]; N]) -> Self {
        Self::from_rows(&rows)
    }
}

impl fmt::Display for GateMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.dim {
            write!(f, "[")?;
            for j in 0..self.dim {
                let v = self.get(i, j);
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:.4}{:+.4}i", v.re, v.im)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
