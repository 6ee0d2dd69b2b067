//! Cox-Ross-Rubinstein binomial model.
//!
//! The stock starts at `S0` and each step moves to `S·(1+U)` or `S·(1+D)`,
//! while cash grows by `(1+R)` per step. Under the risk-neutral measure the
//! up-move has probability
//!
//! ```text
//! q = (R − D) / (U − D)
//! ```
//!
//! which lies strictly inside `(0, 1)` exactly when `D < R < U`.

use crr_core::{ensure, DiscountFactor, Error, Integer, Price, Rate, Real, Result, Size};
use std::fmt;

/// Validated parameters of a binomial lattice.
///
/// Built once per pricing request through [`LatticeModel::new`], which rejects
/// any parameter set admitting arbitrage. The value is immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeModel {
    s0: Price,
    up: Rate,
    down: Rate,
    rate: Rate,
}

impl LatticeModel {
    /// Create a model from the initial price and the per-step returns.
    ///
    /// * `s0` — initial stock price, must be finite and `> 0`
    /// * `up` — return `U` on an up-move, `> -1`
    /// * `down` — return `D` on a down-move, `> -1`
    /// * `rate` — risk-free return `R` per step
    ///
    /// # Errors
    /// * [`Error::InvalidArgument`] for non-finite inputs, `s0 <= 0`,
    ///   `up <= -1` or `down <= -1`
    /// * [`Error::DegenerateModel`] if `up == down`
    /// * [`Error::ArbitrageViolation`] unless `down < rate < up`
    pub fn new(s0: Price, up: Rate, down: Rate, rate: Rate) -> Result<Self> {
        ensure!(
            s0.is_finite() && up.is_finite() && down.is_finite() && rate.is_finite(),
            "model parameters must be finite (S0 = {s0}, U = {up}, D = {down}, R = {rate})"
        );
        ensure!(s0 > 0.0, "initial price must be positive, got S0 = {s0}");
        ensure!(up > -1.0, "up return must exceed -1, got U = {up}");
        ensure!(down > -1.0, "down return must exceed -1, got D = {down}");

        let model = Self {
            s0,
            up,
            down,
            rate,
        };
        model.checked_probability()?;

        tracing::debug!(s0, up, down, rate, "lattice model constructed");
        Ok(model)
    }

    /// `q` for a model that passes the no-arbitrage checks.
    ///
    /// `D < R < U` alone is not enough: when `|D|` dwarfs `U` and `R`, both
    /// `R − D` and `U − D` can round to the same value and `q` lands on 1.
    fn checked_probability(&self) -> Result<Real> {
        let violation = Error::ArbitrageViolation {
            down: self.down,
            rate: self.rate,
            up: self.up,
        };
        ensure!(
            self.up != self.down,
            Error::DegenerateModel {
                up: self.up,
                down: self.down,
            }
        );
        ensure!(self.down < self.rate && self.rate < self.up, violation);
        let q = (self.rate - self.down) / (self.up - self.down);
        ensure!(q > 0.0 && q < 1.0, violation);
        Ok(q)
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Initial stock price `S0`.
    pub fn s0(&self) -> Price {
        self.s0
    }

    /// Up-move return `U`.
    pub fn up(&self) -> Rate {
        self.up
    }

    /// Down-move return `D`.
    pub fn down(&self) -> Rate {
        self.down
    }

    /// Per-step risk-free return `R`.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Cash growth over one step, `1 + R`.
    pub fn growth(&self) -> Real {
        1.0 + self.rate
    }

    /// Discount factor over `steps` steps, `(1 + R)^(−steps)`.
    pub fn discount_factor(&self, steps: Integer) -> DiscountFactor {
        self.growth().powi(steps).recip()
    }

    // ── Lattice queries ──────────────────────────────────────────────────

    /// Risk-neutral probability of an up-move, `q = (R − D) / (U − D)`.
    ///
    /// # Errors
    /// Re-checks the model so that `q` can never fall outside `(0, 1)`:
    /// [`Error::DegenerateModel`] if `U == D`, [`Error::ArbitrageViolation`]
    /// unless `D < R < U` and the computed `q` is strictly inside `(0, 1)`.
    pub fn risk_neutral_probability(&self) -> Result<Real> {
        self.checked_probability()
    }

    /// Stock price at node `(n, i)`: step `n`, `i` up-moves.
    ///
    /// `S(n, i) = S0 · (1 + U)^i · (1 + D)^(n − i)`
    ///
    /// Computed directly while both powers stay normal, otherwise in log
    /// space so that `(1 + U)^i` overflowing never meets `(1 + D)^(n − i)`
    /// underflowing. Prices beyond the `f64` range saturate at
    /// [`Real::MAX`]; the result is never NaN.
    ///
    /// # Panics
    /// Panics if `i > n`.
    pub fn node_price(&self, n: Size, i: Size) -> Price {
        assert!(i <= n, "node ({n}, {i}) outside the lattice: need i <= n");
        let direct = match (i32::try_from(i), i32::try_from(n - i)) {
            (Ok(ups), Ok(downs)) => {
                let up = (1.0 + self.up).powi(ups);
                let down = (1.0 + self.down).powi(downs);
                (up.is_normal() && down.is_normal()).then(|| self.s0 * up * down)
            }
            _ => None,
        };
        match direct {
            Some(price) if price.is_finite() => price,
            _ => {
                let log_price = self.s0.ln()
                    + i as Real * self.up.ln_1p()
                    + (n - i) as Real * self.down.ln_1p();
                log_price.exp().min(Real::MAX)
            }
        }
    }
}

impl fmt::Display for LatticeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CRR(S0={}, U={}, D={}, R={})",
            self.s0, self.up, self.down, self.rate
        )
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
