//! Single-slot inverse cache bound to one matrix.

use tracing::trace;

use crate::{Element, Matrix};

/// A matrix together with its lazily computed inverse.
///
/// The cached inverse, when present, belongs to the matrix currently
/// stored: [`set`](Self::set) always clears it. The stored matrix is only
/// reachable through a shared borrow, so it cannot be edited in place
/// behind the cache's back.
///
/// # Example
///
/// ```
/// use cached_matrix::{solve_cached, CachedMatrix, InverseConfig, Matrix};
///
/// let m = Matrix::from_rows(vec![vec![4.0, 0.0], vec![0.0, 2.0]]).unwrap();
/// let mut x = CachedMatrix::new(m);
/// assert!(x.get_cached_inverse().is_none());
///
/// let inv = solve_cached(&mut x, &InverseConfig::default()).unwrap();
/// assert_eq!(inv.as_slice(), &[0.25, 0.0, 0.0, 0.5]);
/// assert!(x.has_cached_inverse());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CachedMatrix<E: Element> {
    value: Matrix<E>,
    inverse: Option<Matrix<E>>,
}

impl<E: Element> CachedMatrix<E> {
    /// Wrap `value` with no cached inverse.
    pub fn new(value: Matrix<E>) -> Self {
        Self {
            value,
            inverse: None,
        }
    }

    /// Replace the stored matrix and drop any cached inverse.
    ///
    /// The new matrix is not validated; shape problems surface when it is
    /// inverted.
    pub fn set(&mut self, value: Matrix<E>) {
        if self.inverse.take().is_some() {
            trace!(
                rows = value.rows(),
                cols = value.cols(),
                "matrix replaced, cached inverse dropped"
            );
        }
        self.value = value;
    }

    /// The stored matrix.
    pub fn get(&self) -> &Matrix<E> {
        &self.value
    }

    /// Store `inverse` as the cached inverse of the current matrix.
    ///
    /// Any previous entry is overwritten. The caller is trusted: nothing
    /// checks that `inverse` actually inverts [`get`](Self::get).
    pub fn set_cached_inverse(&mut self, inverse: Matrix<E>) -> &Matrix<E> {
        self.inverse.insert(inverse)
    }

    /// The cached inverse, or `None` if none was stored since the last
    /// [`set`](Self::set).
    pub fn get_cached_inverse(&self) -> Option<&Matrix<E>> {
        self.inverse.as_ref()
    }

    pub fn has_cached_inverse(&self) -> bool {
        self.inverse.is_some()
    }

    /// Consume the container, returning the stored matrix.
    pub fn into_inner(self) -> Matrix<E> {
        self.value
    }

    pub(crate) fn take_cached_inverse(&mut self) -> Option<Matrix<E>> {
        self.inverse.take()
    }
}

impl<E: Element> From<Matrix<E>> for CachedMatrix<E> {
    fn from(value: Matrix<E>) -> Self {
        Self::new(value)
    }
}
