//! # crr-pricingengines
//!
//! Pricing entry points for options on the Cox-Ross-Rubinstein lattice.
//!
//! ## Engines
//!
//! - [`price_european`] — discounted risk-neutral expectation of the terminal payoff
//! - [`price_american`] — optimal-stopping (Snell envelope) value
//! - [`BinomialEngine`] — [`PricingEngine`](crr_instruments::PricingEngine)
//!   dispatching on the exercise style, with diagnostic results
//!
//! Every entry point validates its inputs before any lattice work and never
//! writes to the console; progress is reported through `tracing` only.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod binomial_engine;

pub use binomial_engine::{price_american, price_european, BinomialEngine};
