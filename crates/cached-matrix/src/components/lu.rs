//! LU factorization with partial pivoting for general square matrices.
//!
//! ## Algorithm
//!
//! Unblocked right-looking LU with partial pivoting (LAPACK DGETF2 style).
//! For a square matrix A, computes:
//! ```text
//! P * A = L * U
//! ```
//! where:
//! - P is a permutation matrix (stored as vector)
//! - L is lower triangular with unit diagonal
//! - U is upper triangular
//!
//! The explicit inverse is obtained by solving `A * X = I` against the
//! factors, column block at once: forward substitution with L, then
//! backward substitution with U. Cost is O(n³).

use num_traits::{NumCast, ToPrimitive};
use tracing::debug;

use crate::{Element, LinalgError, LinalgResult, Matrix};

/// Configuration for LU factorization and inversion.
///
/// This is the parameter set passed through by
/// [`solve_cached`](crate::solve_cached) to the inversion primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InverseConfig {
    /// Pivot threshold for singularity detection.
    /// If |pivot| <= threshold * max|A|, the matrix is considered singular.
    /// `None` uses `n * epsilon` of the element type, so only pivots lost
    /// to rounding are rejected.
    pub pivot_threshold: Option<f64>,
}

impl InverseConfig {
    /// Override the relative pivot threshold.
    pub fn with_pivot_threshold(mut self, threshold: f64) -> Self {
        self.pivot_threshold = Some(threshold);
        self
    }

    /// Absolute pivot tolerance for an n×n matrix whose largest entry is
    /// `scale`.
    pub fn pivot_tolerance<E: Element>(&self, n: usize, scale: E) -> E {
        let relative = match self.pivot_threshold {
            // Out of range for E: nothing can pass
            Some(t) => <E as NumCast>::from(t).unwrap_or_else(E::infinity),
            None => <E as NumCast>::from(n).unwrap_or_else(E::infinity) * E::epsilon(),
        };
        relative * scale
    }
}

fn lossy_f64<E: Element>(value: E) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Packed result of [`lu_factor`].
#[derive(Debug, Clone, PartialEq)]
pub struct LuFactors<E: Element> {
    /// Combined L+U: L strictly below the diagonal (unit diagonal
    /// implicit), U on and above.
    pub lu: Matrix<E>,
    /// `perm[i]` is the original row now at position i.
    pub perm: Vec<usize>,
}

impl<E: Element> LuFactors<E> {
    /// Dimension of the factored matrix.
    pub fn n(&self) -> usize {
        self.lu.rows()
    }

    /// Extract L (with unit diagonal).
    pub fn l(&self) -> LinalgResult<Matrix<E>> {
        let n = self.n();
        let src = self.lu.as_slice();
        let mut l = Matrix::identity(n)?;
        let data = l.data_mut();
        for i in 0..n {
            data[i * n..i * n + i].copy_from_slice(&src[i * n..i * n + i]);
        }
        Ok(l)
    }

    /// Extract U.
    pub fn u(&self) -> LinalgResult<Matrix<E>> {
        let n = self.n();
        let src = self.lu.as_slice();
        let mut u = Matrix::zeros(n, n)?;
        let data = u.data_mut();
        for i in 0..n {
            data[i * n + i..(i + 1) * n].copy_from_slice(&src[i * n + i..(i + 1) * n]);
        }
        Ok(u)
    }

    /// Apply the row permutation: result = P * A.
    ///
    /// # Errors
    ///
    /// - `InvalidShape`: `a.rows()` differs from the permutation length
    pub fn permute(&self, a: &Matrix<E>) -> LinalgResult<Matrix<E>> {
        if a.rows() != self.perm.len() {
            return Err(LinalgError::InvalidShape {
                reason: format!(
                    "cannot permute {} rows with a permutation of length {}",
                    a.rows(),
                    self.perm.len()
                ),
            });
        }

        let mut out = Vec::with_capacity(a.as_slice().len());
        for &src in &self.perm {
            out.extend_from_slice(a.row(src));
        }
        Matrix::from_vec(a.rows(), a.cols(), out)
    }
}

/// LU factorization with partial pivoting: P * A = L * U
///
/// # Errors
///
/// - `InvalidShape`: Input is not square
/// - `SingularPivot`: Zero or tiny pivot encountered (matrix is singular/near-singular)
///
/// # Example
///
/// ```
/// use cached_matrix::{lu_factor, InverseConfig, Matrix};
///
/// let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// let factors = lu_factor(&a, &InverseConfig::default()).unwrap();
///
/// // Row 1 has the larger leading entry, so it is pivoted to the top.
/// assert_eq!(factors.perm, vec![1, 0]);
/// ```
pub fn lu_factor<E: Element>(a: &Matrix<E>, config: &InverseConfig) -> LinalgResult<LuFactors<E>> {
    if !a.is_square() {
        return Err(LinalgError::InvalidShape {
            reason: format!("LU requires square matrix, got {}×{}", a.rows(), a.cols()),
        });
    }

    let n = a.rows();
    let mut lu = a.clone();
    let mut perm: Vec<usize> = (0..n).collect();

    let threshold = config.pivot_tolerance(n, a.max_abs());
    let data = lu.data_mut();

    for k in 0..n {
        // Find pivot
        let mut pivot_row = k;
        let mut max_val = data[k * n + k].abs();
        for i in (k + 1)..n {
            let val = data[i * n + k].abs();
            if val > max_val {
                max_val = val;
                pivot_row = i;
            }
        }

        if max_val == E::zero() || max_val <= threshold || !max_val.is_finite() {
            debug!(
                index = k,
                pivot = lossy_f64(max_val),
                n,
                dtype = E::NAME,
                "singular pivot"
            );
            return Err(LinalgError::SingularPivot {
                index: k,
                value: lossy_f64(data[pivot_row * n + k]),
            });
        }

        // Swap rows in LU and permutation
        if pivot_row != k {
            for j in 0..n {
                data.swap(k * n + j, pivot_row * n + j);
            }
            perm.swap(k, pivot_row);
        }

        // Eliminate column k
        let pivot = data[k * n + k];
        for i in (k + 1)..n {
            let factor = data[i * n + k] / pivot;
            data[i * n + k] = factor;
            if factor == E::zero() {
                continue;
            }
            for j in (k + 1)..n {
                let u_kj = data[k * n + j];
                data[i * n + j] -= factor * u_kj;
            }
        }
    }

    Ok(LuFactors { lu, perm })
}

/// Solve A * X = B using precomputed LU factorization
///
/// # Algorithm
///
/// 1. Apply permutation: B' = P * B
/// 2. Forward solve: L * Y = B' (L has unit diagonal)
/// 3. Backward solve: U * X = Y
///
/// # Errors
///
/// - `InvalidShape`: `b.rows()` does not match the factored dimension
pub fn solve_lu<E: Element>(factors: &LuFactors<E>, b: &Matrix<E>) -> LinalgResult<Matrix<E>> {
    let n = factors.n();
    if b.rows() != n {
        return Err(LinalgError::InvalidShape {
            reason: format!(
                "right-hand side has {} rows, factorization is {}×{}",
                b.rows(),
                n,
                n
            ),
        });
    }

    let nrhs = b.cols();
    let lu = factors.lu.as_slice();
    let mut x = factors.permute(b)?;
    let xs = x.data_mut();

    // Forward: L * Y = P * B
    for i in 0..n {
        for k in 0..i {
            let l_ik = lu[i * n + k];
            if l_ik == E::zero() {
                continue;
            }
            for j in 0..nrhs {
                let y_kj = xs[k * nrhs + j];
                xs[i * nrhs + j] -= l_ik * y_kj;
            }
        }
    }

    // Backward: U * X = Y
    for i in (0..n).rev() {
        for k in (i + 1)..n {
            let u_ik = lu[i * n + k];
            if u_ik == E::zero() {
                continue;
            }
            for j in 0..nrhs {
                let x_kj = xs[k * nrhs + j];
                xs[i * nrhs + j] -= u_ik * x_kj;
            }
        }
        let u_ii = lu[i * n + i];
        for j in 0..nrhs {
            xs[i * nrhs + j] /= u_ii;
        }
    }

    Ok(x)
}

/// Compute matrix inverse via LU: A^-1 = U^-1 * L^-1 * P
///
/// Solves `A * X = I` against the factors.
pub fn inverse_lu<E: Element>(factors: &LuFactors<E>) -> LinalgResult<Matrix<E>> {
    solve_lu(factors, &Matrix::identity(factors.n())?)
}

/// Factor and invert in one step.
///
/// This is the inversion primitive behind [`LuInverter`](crate::LuInverter).
///
/// # Errors
///
/// - `InvalidShape`: Input is not square
/// - `SingularPivot`: Matrix is singular under the configured threshold
///
/// # Example
///
/// ```
/// use cached_matrix::{invert, InverseConfig, Matrix};
///
/// let a = Matrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 4.0]]).unwrap();
/// let inv = invert(&a, &InverseConfig::default()).unwrap();
/// assert_eq!(inv.as_slice(), &[0.5, 0.0, 0.0, 0.25]);
/// ```
pub fn invert<E: Element>(a: &Matrix<E>, config: &InverseConfig) -> LinalgResult<Matrix<E>> {
    let factors = lu_factor(a, config)?;
    inverse_lu(&factors)
}
