//! # Armorsmith Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Canonical squad fixtures
//! - Repeatability harness for recomputation
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod repeatability;
pub mod strategies;

/// Re-export proptest for convenience.
pub use proptest;
