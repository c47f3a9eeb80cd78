//! High-level solver wrappers.
//!
//! This module provides the cached entry point that callers use instead of
//! inverting directly.

pub mod inverse;
