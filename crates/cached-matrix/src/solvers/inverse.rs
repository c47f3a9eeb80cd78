//! Cached inversion.
//!
//! [`solve_cached`] returns the inverse held by a [`CachedMatrix`] when one
//! is present, and otherwise computes it, stores it, and returns it.

use tracing::{debug, info};

use crate::{invert, CachedMatrix, Element, InverseConfig, LinalgResult, Matrix};

/// A matrix inversion primitive.
///
/// Implementations return the inverse of a square matrix or an error for
/// singular or non-square input.
pub trait Inverter<E: Element> {
    fn invert(&self, a: &Matrix<E>) -> LinalgResult<Matrix<E>>;
}

/// LU-based inversion with partial pivoting.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LuInverter {
    pub config: InverseConfig,
}

impl LuInverter {
    pub fn new(config: InverseConfig) -> Self {
        Self { config }
    }
}

impl<E: Element> Inverter<E> for LuInverter {
    fn invert(&self, a: &Matrix<E>) -> LinalgResult<Matrix<E>> {
        invert(a, &self.config)
    }
}

impl<E, F> Inverter<E> for F
where
    E: Element,
    F: Fn(&Matrix<E>) -> LinalgResult<Matrix<E>>,
{
    fn invert(&self, a: &Matrix<E>) -> LinalgResult<Matrix<E>> {
        self(a)
    }
}

/// Inverse of the matrix stored in `x`, computed at most once per stored
/// matrix.
///
/// `config` is passed through to the LU inversion on a cache miss.
///
/// # Errors
///
/// Whatever the inversion returns: `SingularPivot` for singular input,
/// `InvalidShape` for non-square input. The cache is left empty.
///
/// # Example
///
/// ```
/// use cached_matrix::{solve_cached, CachedMatrix, InverseConfig, Matrix};
///
/// let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// let mut x = CachedMatrix::new(m);
/// let config = InverseConfig::default();
///
/// let first = solve_cached(&mut x, &config).unwrap().clone();
/// // Served from the cache this time.
/// let second = solve_cached(&mut x, &config).unwrap();
/// assert_eq!(&first, second);
/// ```
pub fn solve_cached<'a, E: Element>(
    x: &'a mut CachedMatrix<E>,
    config: &InverseConfig,
) -> LinalgResult<&'a Matrix<E>> {
    solve_cached_with(x, &LuInverter::new(*config))
}

/// [`solve_cached`] over an arbitrary inversion primitive.
///
/// On a hit, logs `"getting cached data"` at info level and returns the
/// stored inverse without calling `inverter`. On a miss, inverts
/// [`CachedMatrix::get`], stores the result and returns it.
pub fn solve_cached_with<'a, E, I>(
    x: &'a mut CachedMatrix<E>,
    inverter: &I,
) -> LinalgResult<&'a Matrix<E>>
where
    E: Element,
    I: Inverter<E> + ?Sized,
{
    let inverse = match x.take_cached_inverse() {
        Some(inverse) => {
            info!("getting cached data");
            inverse
        }
        None => {
            let (rows, cols) = x.get().shape();
            debug!(rows, cols, dtype = E::NAME, "inverse not cached, computing");
            inverter.invert(x.get())?
        }
    };

    Ok(x.set_cached_inverse(inverse))
}
