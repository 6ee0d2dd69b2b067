//! # crr-methods
//!
//! Numerical methods on the Cox-Ross-Rubinstein lattice: the
//! [`BinomialTree`] view of a validated model and the backward-induction
//! routines for European and American (Snell envelope) valuation.
//!
//! # Modules
//!
//! * [`lattice`] — binomial tree and backward-induction pricing

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: binomial tree, backward induction.
pub mod lattice;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{price_american, price_european, roll_back, terminal_values, BinomialTree};

#[cfg(feature = "parallel")]
pub use lattice::parallel::{price_american_parallel, price_european_parallel};
