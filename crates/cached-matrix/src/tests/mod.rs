//! Test infrastructure and utilities.

mod cache_tests;

pub use test_utils::{dominant_matrix, identity_residual, CountingInverter};
