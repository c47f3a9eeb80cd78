//! Scalar element types supported by [`Matrix`](crate::Matrix).
//!
//! The default singularity tolerance follows each type's machine epsilon,
//! so single precision is not held to a double precision bound.

use core::fmt::{Debug, Display};

use num_traits::{Float, NumAssign};

/// Floating-point scalar usable as a matrix element.
///
/// # Example
///
/// ```
/// use cached_matrix::Element;
/// use num_traits::Float;
///
/// fn unit_roundoff<E: Element>() -> E {
///     E::epsilon()
/// }
///
/// assert!(f64::from(unit_roundoff::<f32>()) > unit_roundoff::<f64>());
/// ```
pub trait Element: Float + NumAssign + Debug + Display + Send + Sync + 'static {
    /// Name of the element type, used in log fields.
    const NAME: &'static str;
}

impl Element for f32 {
    const NAME: &'static str = "f32";
}

impl Element for f64 {
    const NAME: &'static str = "f64";
}
