//! Error types for matrix construction and inversion.

use thiserror::Error;

/// Errors that can occur while building or inverting a matrix.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinalgError {
    /// Singular matrix detected during factorization.
    #[error("Singular matrix: pivot at index {index} is zero or too small (value: {value})")]
    SingularPivot {
        /// Index of the singular pivot
        index: usize,
        /// Value of the pivot
        value: f64,
    },

    /// Invalid matrix shape.
    #[error("Invalid shape: {reason}")]
    InvalidShape {
        /// Description of the shape error
        reason: String,
    },
}

impl LinalgError {
    /// Returns `true` for the singular-matrix failure.
    pub fn is_singular(&self) -> bool {
        matches!(self, LinalgError::SingularPivot { .. })
    }
}

/// Result type for linear algebra operations.
pub type LinalgResult<T> = Result<T, LinalgError>;
