//! Core components.
//!
//! - LU factorization and the explicit inverse built on it
//! - The single-slot inverse cache

pub mod cache;
pub mod lu;
