//! # crr-core
//!
//! Core types, error definitions, and validation macros for crr-lattice.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace – numeric type aliases, the error enum, and
//! the `ensure!` / `fail!` macros used for up-front input validation.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Integer type used for step counts crossing the public API.
///
/// Signed so that a negative step count is representable and can be
/// reported as [`Error::InvalidSteps`] instead of wrapping.
pub type Integer = i32;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A per-step rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A discount factor in (0, 1] for non-negative rates.
pub type DiscountFactor = Real;

/// A price or value.
pub type Price = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
