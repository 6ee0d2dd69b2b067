//! # crr-instruments
//!
//! Option contracts priced on the lattice: the closed [`Payoff`] family,
//! the [`ExerciseType`], the [`LatticeOption`] bundling them with a step
//! count, and the [`PricingEngine`] interface engines implement.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod exercise;
pub mod instrument;
pub mod option;
pub mod payoff;

pub use exercise::ExerciseType;
pub use instrument::{PricingEngine, PricingResults};
pub use option::{LatticeOption, LatticeOptionArguments};
pub use payoff::{Payoff, PayoffKind};
