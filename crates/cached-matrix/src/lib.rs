//! # Cached Matrix
//!
//! Dense matrix inversion with a memoized inverse.
//!
//! ## Features
//!
//! - **Matrix**: row-major dense storage with explicit dimensions
//! - **LU factorization**: partial pivoting, triangular solves, explicit inverse
//! - **CachedMatrix**: one matrix plus its lazily computed inverse
//! - **solve_cached**: inverse on demand, served from the cache while the
//!   stored matrix is unchanged
//!
//! ## Example
//!
//! ```
//! use cached_matrix::{solve_cached, CachedMatrix, InverseConfig, Matrix};
//!
//! let m = Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
//! let mut x = CachedMatrix::new(m);
//! let config = InverseConfig::default();
//!
//! solve_cached(&mut x, &config).unwrap();
//!
//! // Replacing the matrix drops the cached inverse.
//! x.set(Matrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 2.0]]).unwrap());
//! assert!(x.get_cached_inverse().is_none());
//!
//! let inv = solve_cached(&mut x, &config).unwrap();
//! assert_eq!(inv.as_slice(), &[0.5, 0.0, 0.0, 0.5]);
//! ```

mod error;
mod matrix;
mod precision;

/// Core components
pub mod components;

/// High-level solver wrappers
pub mod solvers;

/// Test utilities and scenario tests
#[cfg(any(test, feature = "export_tests"))]
pub mod tests;

// Re-export public API
pub use error::*;
pub use matrix::*;
pub use precision::*;

// Re-export key components
pub use components::cache::*;
pub use components::lu::*;

// Re-export solvers
pub use solvers::inverse::*;
