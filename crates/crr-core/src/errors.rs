//! Error types for crr-lattice.
//!
//! Every failure the pricing core can report is a variant of the single
//! `thiserror`-derived [`Error`] enum. All of them are detected at
//! construction or at pricer entry, before any lattice computation starts.
//! The [`ensure!`](crate::ensure) and [`fail!`](crate::fail) macros are the
//! usual way to raise them.

use crate::{Integer, Real};
use thiserror::Error;

/// The top-level error type used throughout crr-lattice.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The model does not satisfy `D < R < U`.
    #[error("arbitrage violation: require D < R < U, got D = {down}, R = {rate}, U = {up}")]
    ArbitrageViolation {
        /// Down-move return `D`.
        down: Real,
        /// Per-step rate `R`.
        rate: Real,
        /// Up-move return `U`.
        up: Real,
    },

    /// `U == D`, so the risk-neutral probability is undefined.
    #[error("degenerate model: up and down returns coincide (U = {up}, D = {down})")]
    DegenerateModel {
        /// Up-move return `U`.
        up: Real,
        /// Down-move return `D`.
        down: Real,
    },

    /// A two-strike payoff was given `K1 >= K2`.
    #[error("invalid strike order: require K1 < K2, got K1 = {lower}, K2 = {upper}")]
    InvalidStrikeOrder {
        /// The first (expected lower) strike.
        lower: Real,
        /// The second (expected upper) strike.
        upper: Real,
    },

    /// A negative number of lattice steps.
    #[error("invalid number of steps: {0} (must be >= 0)")]
    InvalidSteps(Integer),

    /// A parameter outside its admissible range (e.g. `S0 <= 0`).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Shorthand `Result` type used throughout crr-lattice.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err($err)` early if `$cond` is false.
///
/// The second argument is either an [`Error`] value or a format string,
/// in which case an [`Error::InvalidArgument`] is built from it.
///
/// # Example
/// ```
/// use crr_core::{ensure, errors::{Error, Result}};
/// fn positive(x: f64) -> Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// fn steps(n: i32) -> Result<usize> {
///     ensure!(n >= 0, Error::InvalidSteps(n));
///     Ok(n as usize)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// assert_eq!(steps(-3), Err(Error::InvalidSteps(-3)));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidArgument(
                format!($fmt $(, $arg)*)
            ));
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err);
        }
    };
}

/// Return `Err(...)` immediately.
///
/// Accepts the same two forms as [`ensure!`](crate::ensure).
///
/// # Example
/// ```
/// use crr_core::{fail, errors::{Error, Result}};
/// fn always_err() -> Result<()> {
///     fail!(Error::DegenerateModel { up: 0.05, down: 0.05 });
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        return Err($crate::errors::Error::InvalidArgument(format!($fmt $(, $arg)*)))
    };
    ($err:expr $(,)?) => {
        return Err($err)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_rate(rate: Real) -> Result<Real> {
        crate::ensure!(rate.is_finite(), "rate must be finite, got {rate}");
        crate::ensure!(
            rate > -1.0,
            Error::ArbitrageViolation {
                down: -1.0,
                rate,
                up: 1.0
            }
        );
        Ok(rate)
    }

    #[test]
    fn ensure_with_message_builds_invalid_argument() {
        match check_rate(Real::NAN) {
            Err(Error::InvalidArgument(msg)) => assert!(msg.contains("finite")),
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn ensure_with_error_value_returns_it_verbatim() {
        assert_eq!(
            check_rate(-2.0),
            Err(Error::ArbitrageViolation {
                down: -1.0,
                rate: -2.0,
                up: 1.0
            })
        );
        assert_eq!(check_rate(0.05), Ok(0.05));
    }

    #[test]
    fn display_messages_name_the_offending_values() {
        let e = Error::InvalidStrikeOrder {
            lower: 110.0,
            upper: 90.0,
        };
        assert_eq!(
            e.to_string(),
            "invalid strike order: require K1 < K2, got K1 = 110, K2 = 90"
        );
        assert_eq!(
            Error::InvalidSteps(-1).to_string(),
            "invalid number of steps: -1 (must be >= 0)"
        );
        assert!(Error::DegenerateModel { up: 0.05, down: 0.05 }
            .to_string()
            .contains("degenerate"));
    }

    #[test]
    fn error_is_std_error() {
        let err = Error::InvalidArgument("x".into());
        let _: &dyn std::error::Error = &err;
    }
}
