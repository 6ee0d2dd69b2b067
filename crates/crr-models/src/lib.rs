//! # crr-models
//!
//! The discrete multiplicative price model underlying every lattice
//! computation in the workspace.
//!
//! ```text
//! S(n, i) = S0 · (1 + U)^i · (1 + D)^(n − i),     0 ≤ i ≤ n
//! q       = (R − D) / (U − D)
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod lattice_model;

pub use lattice_model::LatticeModel;
