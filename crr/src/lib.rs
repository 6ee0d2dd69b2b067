//! # crr
//!
//! European and American option pricing on the Cox-Ross-Rubinstein
//! binomial lattice.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `crr-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! crr = "0.1"
//! ```
//!
//! ```rust
//! use crr::instruments::Payoff;
//! use crr::models::LatticeModel;
//! use crr::pricingengines::{price_american, price_european};
//!
//! let model = LatticeModel::new(100.0, 0.1, -0.1, 0.05).unwrap();
//! let put = Payoff::put(100.0);
//! let eur = price_european(&model, 2, &put).unwrap();
//! let am = price_american(&model, 2, &put).unwrap();
//! assert!(am >= eur);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use crr_core as core;

/// The validated lattice model.
pub use crr_models as models;

/// Payoffs, exercise styles, options, and the engine interface.
pub use crr_instruments as instruments;

/// Binomial tree and backward induction.
pub use crr_methods as methods;

/// Pricing entry points and the binomial engine.
pub use crr_pricingengines as pricingengines;

pub use crr_core::{Error, Result};
