//! Option payoffs.
//!
//! A closed set of path-independent contracts, each evaluated at a single
//! underlying price `z`: the terminal price for European exercise, or the
//! current node price when computing American intrinsic value.
//!
//! | Kind | Payoff(z) |
//! |---|---|
//! | Call(K) | `max(z − K, 0)` |
//! | Put(K) | `max(K − z, 0)` |
//! | DigitalCall(K) | `1` if `z > K` |
//! | DigitalPut(K) | `1` if `z < K` |
//! | DoubleDigital(K1,K2) | `1` if `K1 < z < K2` |
//! | BullSpread(K1,K2) | `0` on `z ≤ K1`, `z − K1` on `(K1, K2)`, `K2 − K1` on `z ≥ K2` |
//! | BearSpread(K1,K2) | `K2 − K1` on `z ≤ K1`, `K2 − z` on `(K1, K2)`, `0` on `z ≥ K2` |
//! | Butterfly(K1,K2) | `(z − K1)/2` on `(K1, mid]`, `K2 − z` on `(mid, K2]`, else `0` |
//! | Strangle(K1,K2) | `K1 − z` on `z ≤ K1`, `0` on `(K1, K2]`, `z − K2` above |
//!
//! The inclusive/exclusive edges are part of the contract and are kept
//! exactly as tabulated, including where neighbouring kinds differ.

use crr_core::{ensure, Error, Real, Result};
use std::fmt;
use std::str::FromStr;

/// Payoff kind without its strikes.
///
/// Used to request a payoff by name (see [`Payoff::from_strikes`]) and to
/// match exhaustively on the contract family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayoffKind {
    /// Vanilla call.
    Call,
    /// Vanilla put.
    Put,
    /// Cash-or-nothing call paying 1.
    DigitalCall,
    /// Cash-or-nothing put paying 1.
    DigitalPut,
    /// Pays 1 strictly between two strikes.
    DoubleDigital,
    /// Call spread.
    BullSpread,
    /// Put spread.
    BearSpread,
    /// Asymmetric butterfly between two strikes.
    Butterfly,
    /// Put below the lower strike plus call above the upper strike.
    Strangle,
}

impl PayoffKind {
    /// Every kind, in declaration order.
    pub const ALL: [PayoffKind; 9] = [
        PayoffKind::Call,
        PayoffKind::Put,
        PayoffKind::DigitalCall,
        PayoffKind::DigitalPut,
        PayoffKind::DoubleDigital,
        PayoffKind::BullSpread,
        PayoffKind::BearSpread,
        PayoffKind::Butterfly,
        PayoffKind::Strangle,
    ];

    /// Number of strikes the kind is parameterised by (1 or 2).
    pub fn strike_count(self) -> usize {
        match self {
            PayoffKind::Call
            | PayoffKind::Put
            | PayoffKind::DigitalCall
            | PayoffKind::DigitalPut => 1,
            PayoffKind::DoubleDigital
            | PayoffKind::BullSpread
            | PayoffKind::BearSpread
            | PayoffKind::Butterfly
            | PayoffKind::Strangle => 2,
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            PayoffKind::Call => "Call",
            PayoffKind::Put => "Put",
            PayoffKind::DigitalCall => "DigitalCall",
            PayoffKind::DigitalPut => "DigitalPut",
            PayoffKind::DoubleDigital => "DoubleDigital",
            PayoffKind::BullSpread => "BullSpread",
            PayoffKind::BearSpread => "BearSpread",
            PayoffKind::Butterfly => "Butterfly",
            PayoffKind::Strangle => "Strangle",
        }
    }
}

impl fmt::Display for PayoffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PayoffKind {
    type Err = Error;

    /// Parse a kind case-insensitively, ignoring `-` and `_`
    /// (`"bull-spread"`, `"BullSpread"` and `"bull_spread"` are equivalent).
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        PayoffKind::ALL
            .into_iter()
            .find(|k| k.name().to_lowercase() == key)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown payoff kind '{s}'")))
    }
}

/// A contract payoff with its strike(s).
///
/// Two-strike variants carry `lower < upper`. The named constructors enforce
/// this; [`Payoff::validate`] re-checks a value built directly from the
/// variants, and both pricers call it before touching the lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payoff {
    /// `max(z − K, 0)`
    Call {
        /// Strike `K`.
        strike: Real,
    },
    /// `max(K − z, 0)`
    Put {
        /// Strike `K`.
        strike: Real,
    },
    /// `1` if `z > K`, else `0`
    DigitalCall {
        /// Strike `K`.
        strike: Real,
    },
    /// `1` if `z < K`, else `0`
    DigitalPut {
        /// Strike `K`.
        strike: Real,
    },
    /// `1` if `K1 < z < K2`, else `0`
    DoubleDigital {
        /// Lower strike `K1`.
        lower: Real,
        /// Upper strike `K2`.
        upper: Real,
    },
    /// Long call at `K1`, short call at `K2`.
    BullSpread {
        /// Lower strike `K1`.
        lower: Real,
        /// Upper strike `K2`.
        upper: Real,
    },
    /// Long put at `K2`, short put at `K1`.
    BearSpread {
        /// Lower strike `K1`.
        lower: Real,
        /// Upper strike `K2`.
        upper: Real,
    },
    /// Peaks at the midpoint `(K1 + K2) / 2`.
    Butterfly {
        /// Lower strike `K1`.
        lower: Real,
        /// Upper strike `K2`.
        upper: Real,
    },
    /// Long put at `K1`, long call at `K2`.
    Strangle {
        /// Lower strike `K1`.
        lower: Real,
        /// Upper strike `K2`.
        upper: Real,
    },
}

impl Payoff {
    // ── Single-strike constructors ───────────────────────────────────────

    /// Vanilla call.
    pub fn call(strike: Real) -> Self {
        Payoff::Call { strike }
    }

    /// Vanilla put.
    pub fn put(strike: Real) -> Self {
        Payoff::Put { strike }
    }

    /// Digital call.
    pub fn digital_call(strike: Real) -> Self {
        Payoff::DigitalCall { strike }
    }

    /// Digital put.
    pub fn digital_put(strike: Real) -> Self {
        Payoff::DigitalPut { strike }
    }

    // ── Two-strike constructors ──────────────────────────────────────────

    /// Double digital paying 1 strictly inside `(lower, upper)`.
    ///
    /// # Errors
    /// [`Error::InvalidStrikeOrder`] unless `lower < upper`.
    pub fn double_digital(lower: Real, upper: Real) -> Result<Self> {
        check_order(lower, upper)?;
        Ok(Payoff::DoubleDigital { lower, upper })
    }

    /// Bull spread.
    ///
    /// # Errors
    /// [`Error::InvalidStrikeOrder`] unless `lower < upper`.
    pub fn bull_spread(lower: Real, upper: Real) -> Result<Self> {
        check_order(lower, upper)?;
        Ok(Payoff::BullSpread { lower, upper })
    }

    /// Bear spread.
    ///
    /// # Errors
    /// [`Error::InvalidStrikeOrder`] unless `lower < upper`.
    pub fn bear_spread(lower: Real, upper: Real) -> Result<Self> {
        check_order(lower, upper)?;
        Ok(Payoff::BearSpread { lower, upper })
    }

    /// Butterfly.
    ///
    /// # Errors
    /// [`Error::InvalidStrikeOrder`] unless `lower < upper`.
    pub fn butterfly(lower: Real, upper: Real) -> Result<Self> {
        check_order(lower, upper)?;
        Ok(Payoff::Butterfly { lower, upper })
    }

    /// Strangle.
    ///
    /// # Errors
    /// [`Error::InvalidStrikeOrder`] unless `lower < upper`.
    pub fn strangle(lower: Real, upper: Real) -> Result<Self> {
        check_order(lower, upper)?;
        Ok(Payoff::Strangle { lower, upper })
    }

    /// Build a payoff of the given kind from a strike list.
    ///
    /// Single-strike kinds read `strikes[0]` and ignore a trailing second
    /// strike; two-strike kinds read `strikes[0]` as `K1` and `strikes[1]`
    /// as `K2`. Strikes are never reordered.
    ///
    /// # Errors
    /// * [`Error::InvalidArgument`] for too few or too many strikes, or a
    ///   non-finite strike
    /// * [`Error::InvalidStrikeOrder`] if a two-strike kind gets `K1 >= K2`
    pub fn from_strikes(kind: PayoffKind, strikes: &[Real]) -> Result<Self> {
        let needed = kind.strike_count();
        ensure!(
            strikes.len() >= needed && strikes.len() <= 2,
            "{kind} takes {needed} strike(s), got {}",
            strikes.len()
        );
        let payoff = match kind {
            PayoffKind::Call => Payoff::call(strikes[0]),
            PayoffKind::Put => Payoff::put(strikes[0]),
            PayoffKind::DigitalCall => Payoff::digital_call(strikes[0]),
            PayoffKind::DigitalPut => Payoff::digital_put(strikes[0]),
            PayoffKind::DoubleDigital => Payoff::double_digital(strikes[0], strikes[1])?,
            PayoffKind::BullSpread => Payoff::bull_spread(strikes[0], strikes[1])?,
            PayoffKind::BearSpread => Payoff::bear_spread(strikes[0], strikes[1])?,
            PayoffKind::Butterfly => Payoff::butterfly(strikes[0], strikes[1])?,
            PayoffKind::Strangle => Payoff::strangle(strikes[0], strikes[1])?,
        };
        payoff.validate()?;
        Ok(payoff)
    }

    // ── Inspectors ───────────────────────────────────────────────────────

    /// The contract family.
    pub fn kind(&self) -> PayoffKind {
        match self {
            Payoff::Call { .. } => PayoffKind::Call,
            Payoff::Put { .. } => PayoffKind::Put,
            Payoff::DigitalCall { .. } => PayoffKind::DigitalCall,
            Payoff::DigitalPut { .. } => PayoffKind::DigitalPut,
            Payoff::DoubleDigital { .. } => PayoffKind::DoubleDigital,
            Payoff::BullSpread { .. } => PayoffKind::BullSpread,
            Payoff::BearSpread { .. } => PayoffKind::BearSpread,
            Payoff::Butterfly { .. } => PayoffKind::Butterfly,
            Payoff::Strangle { .. } => PayoffKind::Strangle,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// The strike(s): `(K, None)` or `(K1, Some(K2))`.
    pub fn strikes(&self) -> (Real, Option<Real>) {
        match *self {
            Payoff::Call { strike }
            | Payoff::Put { strike }
            | Payoff::DigitalCall { strike }
            | Payoff::DigitalPut { strike } => (strike, None),
            Payoff::DoubleDigital { lower, upper }
            | Payoff::BullSpread { lower, upper }
            | Payoff::BearSpread { lower, upper }
            | Payoff::Butterfly { lower, upper }
            | Payoff::Strangle { lower, upper } => (lower, Some(upper)),
        }
    }

    /// Check finite strikes and, for two-strike kinds, `K1 < K2`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] for a non-finite strike,
    /// [`Error::InvalidStrikeOrder`] for misordered strikes.
    pub fn validate(&self) -> Result<()> {
        let (first, second) = self.strikes();
        ensure!(first.is_finite(), "strike must be finite, got {first}");
        if let Some(second) = second {
            ensure!(second.is_finite(), "strike must be finite, got {second}");
            check_order(first, second)?;
        }
        Ok(())
    }

    // ── Evaluation ───────────────────────────────────────────────────────

    /// Payoff received when the underlying is at `z`.
    pub fn evaluate(&self, z: Real) -> Real {
        match *self {
            Payoff::Call { strike } => {
                if z > strike {
                    z - strike
                } else {
                    0.0
                }
            }
            Payoff::Put { strike } => {
                if z < strike {
                    strike - z
                } else {
                    0.0
                }
            }
            Payoff::DigitalCall { strike } => indicator(z > strike),
            Payoff::DigitalPut { strike } => indicator(z < strike),
            Payoff::DoubleDigital { lower, upper } => indicator(lower < z && z < upper),
            Payoff::BullSpread { lower, upper } => {
                if z <= lower {
                    0.0
                } else if z < upper {
                    z - lower
                } else {
                    upper - lower
                }
            }
            Payoff::BearSpread { lower, upper } => {
                if z <= lower {
                    upper - lower
                } else if z < upper {
                    upper - z
                } else {
                    0.0
                }
            }
            Payoff::Butterfly { lower, upper } => {
                let mid = 0.5 * (lower + upper);
                if z > lower && z <= mid {
                    0.5 * (z - lower)
                } else if z > mid && z <= upper {
                    upper - z
                } else {
                    0.0
                }
            }
            Payoff::Strangle { lower, upper } => {
                if z <= lower {
                    lower - z
                } else if z <= upper {
                    0.0
                } else {
                    z - upper
                }
            }
        }
    }
}

impl fmt::Display for Payoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.strikes() {
            (k, None) => write!(f, "{}(K={k})", self.name()),
            (k1, Some(k2)) => write!(f, "{}(K1={k1}, K2={k2})", self.name()),
        }
    }
}

#[inline]
fn indicator(hit: bool) -> Real {
    if hit {
        1.0
    } else {
        0.0
    }
}

fn check_order(lower: Real, upper: Real) -> Result<()> {
    // NaN fails the comparison too
    ensure!(lower < upper, Error::InvalidStrikeOrder { lower, upper });
    Ok(())
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn vanilla_payoffs() {
        let call = Payoff::call(100.0);
        assert_relative_eq!(call.evaluate(110.0), 10.0);
        assert_eq!(call.evaluate(100.0), 0.0);
        assert_eq!(call.evaluate(90.0), 0.0);

        let put = Payoff::put(100.0);
        assert_relative_eq!(put.evaluate(90.0), 10.0);
        assert_eq!(put.evaluate(100.0), 0.0);
        assert_eq!(put.evaluate(110.0), 0.0);
    }

    #[test]
    fn digital_payoffs_are_strict_at_the_strike() {
        let dc = Payoff::digital_call(100.0);
        assert_eq!(dc.evaluate(100.0), 0.0);
        assert_eq!(dc.evaluate(100.01), 1.0);
        let dp = Payoff::digital_put(100.0);
        assert_eq!(dp.evaluate(100.0), 0.0);
        assert_eq!(dp.evaluate(99.99), 1.0);
    }

    #[test]
    fn double_digital_excludes_both_strikes() {
        let dd = Payoff::double_digital(90.0, 110.0).unwrap();
        assert_eq!(dd.evaluate(90.0), 0.0);
        assert_eq!(dd.evaluate(100.0), 1.0);
        assert_eq!(dd.evaluate(110.0), 0.0);
        assert_eq!(dd.evaluate(50.0), 0.0);
    }

    #[test]
    fn bull_spread_branches() {
        let p = Payoff::bull_spread(90.0, 110.0).unwrap();
        assert_eq!(p.evaluate(80.0), 0.0);
        assert_eq!(p.evaluate(90.0), 0.0);
        assert_relative_eq!(p.evaluate(100.0), 10.0);
        assert_relative_eq!(p.evaluate(110.0), 20.0);
        assert_relative_eq!(p.evaluate(150.0), 20.0);
    }

    #[test]
    fn bear_spread_branches() {
        let p = Payoff::bear_spread(90.0, 110.0).unwrap();
        assert_relative_eq!(p.evaluate(80.0), 20.0);
        assert_relative_eq!(p.evaluate(90.0), 20.0);
        assert_relative_eq!(p.evaluate(100.0), 10.0);
        assert_eq!(p.evaluate(110.0), 0.0);
        assert_eq!(p.evaluate(150.0), 0.0);
    }

    #[test]
    fn butterfly_midpoint_belongs_to_lower_branch() {
        let p = Payoff::butterfly(90.0, 110.0).unwrap();
        assert_relative_eq!(p.evaluate(100.0), 5.0);
        assert_eq!(p.evaluate(90.0), 0.0);
        assert_relative_eq!(p.evaluate(95.0), 2.5);
        assert_relative_eq!(p.evaluate(105.0), 5.0);
        assert_eq!(p.evaluate(110.0), 0.0);
        assert_eq!(p.evaluate(120.0), 0.0);
        // the two legs do not meet: just above the midpoint the upper leg is ~10
        assert!(p.evaluate(100.000_001) > 9.99);
    }

    #[test]
    fn strangle_branches() {
        let p = Payoff::strangle(90.0, 110.0).unwrap();
        assert_relative_eq!(p.evaluate(80.0), 10.0);
        assert_eq!(p.evaluate(90.0), 0.0);
        assert_eq!(p.evaluate(100.0), 0.0);
        assert_eq!(p.evaluate(110.0), 0.0);
        assert_relative_eq!(p.evaluate(125.0), 15.0);
    }

    #[test]
    fn two_strike_constructors_reject_misordered_strikes() {
        let expected = Err(Error::InvalidStrikeOrder {
            lower: 110.0,
            upper: 90.0,
        });
        assert_eq!(Payoff::bull_spread(110.0, 90.0), expected);
        assert_eq!(Payoff::bear_spread(110.0, 90.0), expected);
        assert_eq!(Payoff::butterfly(110.0, 90.0), expected);
        assert_eq!(Payoff::strangle(110.0, 90.0), expected);
        assert_eq!(Payoff::double_digital(110.0, 90.0), expected);
        assert!(matches!(
            Payoff::bull_spread(100.0, 100.0),
            Err(Error::InvalidStrikeOrder { .. })
        ));
    }

    #[test]
    fn validate_catches_directly_built_variants() {
        let p = Payoff::Strangle {
            lower: 110.0,
            upper: 90.0,
        };
        assert!(matches!(p.validate(), Err(Error::InvalidStrikeOrder { .. })));
        assert!(matches!(
            Payoff::call(Real::NAN).validate(),
            Err(Error::InvalidArgument(_))
        ));
        assert!(Payoff::call(100.0).validate().is_ok());
    }

    #[test]
    fn from_strikes_dispatches_on_kind() {
        for kind in PayoffKind::ALL {
            let p = Payoff::from_strikes(kind, &[90.0, 110.0]).unwrap();
            assert_eq!(p.kind(), kind);
            let (k1, k2) = p.strikes();
            assert_eq!(k1, 90.0);
            assert_eq!(k2.is_some(), kind.strike_count() == 2);
        }
        assert_eq!(
            Payoff::from_strikes(PayoffKind::Put, &[95.0]).unwrap(),
            Payoff::put(95.0)
        );
    }

    #[test]
    fn from_strikes_checks_count_and_order() {
        assert!(matches!(
            Payoff::from_strikes(PayoffKind::Butterfly, &[90.0]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Payoff::from_strikes(PayoffKind::Call, &[]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Payoff::from_strikes(PayoffKind::Call, &[1.0, 2.0, 3.0]),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(
            Payoff::from_strikes(PayoffKind::BullSpread, &[110.0, 90.0]),
            Err(Error::InvalidStrikeOrder {
                lower: 110.0,
                upper: 90.0
            })
        );
    }

    #[test]
    fn kind_parsing() {
        assert_eq!("call".parse::<PayoffKind>().unwrap(), PayoffKind::Call);
        assert_eq!(
            "bull-spread".parse::<PayoffKind>().unwrap(),
            PayoffKind::BullSpread
        );
        assert_eq!(
            "Double_Digital".parse::<PayoffKind>().unwrap(),
            PayoffKind::DoubleDigital
        );
        assert!("asian".parse::<PayoffKind>().is_err());
        for kind in PayoffKind::ALL {
            assert_eq!(kind.to_string().parse::<PayoffKind>().unwrap(), kind);
        }
    }

    #[test]
    fn display() {
        assert_eq!(Payoff::call(100.0).to_string(), "Call(K=100)");
        assert_eq!(
            Payoff::butterfly(90.0, 110.0).unwrap().to_string(),
            "Butterfly(K1=90, K2=110)"
        );
    }
}
