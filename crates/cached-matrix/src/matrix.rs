//! Dense row-major matrix storage.

use core::fmt;

use crate::{Element, LinalgError, LinalgResult};

/// Dense matrix stored row-major with explicit dimensions.
///
/// Shape is fixed at construction. There is no element-wise mutable access:
/// a new matrix is built instead, which keeps cached results derived from a
/// matrix valid for as long as the matrix itself is alive.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<E: Element> {
    data: Vec<E>,
    rows: usize,
    cols: usize,
}

impl<E: Element> Matrix<E> {
    /// Build a matrix from row vectors.
    ///
    /// # Errors
    ///
    /// - `InvalidShape`: rows have different lengths
    ///
    /// # Example
    ///
    /// ```
    /// use cached_matrix::Matrix;
    ///
    /// let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(m.shape(), (2, 2));
    /// assert_eq!(m.get(1, 0), Some(3.0));
    /// ```
    pub fn from_rows(rows: Vec<Vec<E>>) -> LinalgResult<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);

        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(LinalgError::InvalidShape {
                    reason: format!(
                        "ragged rows: row {} has {} columns, expected {}",
                        i,
                        row.len(),
                        n_cols
                    ),
                });
            }
            data.extend(row);
        }

        Ok(Self {
            data,
            rows: n_rows,
            cols: n_cols,
        })
    }

    /// Build a matrix from a flat row-major buffer.
    ///
    /// # Errors
    ///
    /// - `InvalidShape`: `rows * cols` overflows, or `data.len() != rows * cols`
    pub fn from_vec(rows: usize, cols: usize, data: Vec<E>) -> LinalgResult<Self> {
        if data.len() != element_count(rows, cols)? {
            return Err(LinalgError::InvalidShape {
                reason: format!(
                    "buffer of length {} does not match {}×{}",
                    data.len(),
                    rows,
                    cols
                ),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// All-zero matrix.
    ///
    /// # Errors
    ///
    /// - `InvalidShape`: `rows * cols` overflows
    pub fn zeros(rows: usize, cols: usize) -> LinalgResult<Self> {
        Ok(Self {
            data: vec![E::zero(); element_count(rows, cols)?],
            rows,
            cols,
        })
    }

    /// Identity matrix of size n×n.
    ///
    /// # Errors
    ///
    /// - `InvalidShape`: `n * n` overflows
    pub fn identity(n: usize) -> LinalgResult<Self> {
        let mut m = Self::zeros(n, n)?;
        for i in 0..n {
            m.data[i * n + i] = E::one();
        }
        Ok(m)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at `(row, col)`, or `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<E> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Borrow one row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    pub fn row(&self, row: usize) -> &[E] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Row-major view of all elements.
    pub fn as_slice(&self) -> &[E] {
        &self.data
    }

    /// Largest absolute entry, zero for an empty matrix.
    pub fn max_abs(&self) -> E {
        self.data
            .iter()
            .fold(E::zero(), |acc, &v| acc.max(v.abs()))
    }

    /// Matrix product `self * rhs`.
    ///
    /// # Errors
    ///
    /// - `InvalidShape`: `self.cols() != rhs.rows()`
    pub fn matmul(&self, rhs: &Matrix<E>) -> LinalgResult<Matrix<E>> {
        if self.cols != rhs.rows {
            return Err(LinalgError::InvalidShape {
                reason: format!(
                    "matmul dimension mismatch: {}×{} * {}×{}",
                    self.rows, self.cols, rhs.rows, rhs.cols
                ),
            });
        }

        let (m, k, n) = (self.rows, self.cols, rhs.cols);
        let mut out = Matrix::zeros(m, n)?;
        for i in 0..m {
            for p in 0..k {
                let a = self.data[i * k + p];
                if a == E::zero() {
                    continue;
                }
                for j in 0..n {
                    out.data[i * n + j] += a * rhs.data[p * n + j];
                }
            }
        }
        Ok(out)
    }

    /// Same shape and every pair of entries within `tol` of each other.
    pub fn approx_eq(&self, other: &Matrix<E>, tol: E) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(&a, &b)| (a - b).abs() <= tol)
    }

    pub(crate) fn data_mut(&mut self) -> &mut [E] {
        &mut self.data
    }
}

impl<E: Element> Default for Matrix<E> {
    /// Empty 0×0 matrix.
    fn default() -> Self {
        Self {
            data: Vec::new(),
            rows: 0,
            cols: 0,
        }
    }
}

fn element_count(rows: usize, cols: usize) -> LinalgResult<usize> {
    rows.checked_mul(cols).ok_or_else(|| LinalgError::InvalidShape {
        reason: format!("{}×{} overflows the addressable element count", rows, cols),
    })
}

impl<E: Element> fmt::Display for Matrix<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            write!(f, "[")?;
            for (j, v) in self.row(i).iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:8.4}", v)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
