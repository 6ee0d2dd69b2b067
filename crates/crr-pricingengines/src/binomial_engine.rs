//! Binomial pricing engine.
//!
//! [`price_european`] and [`price_american`] are the boundary of the pricing
//! core: they take an already-validated [`LatticeModel`], a step count and a
//! [`Payoff`], and return a single price. [`BinomialEngine`] wraps them
//! behind the [`PricingEngine`] interface.

use crr_core::{errors::Result, Integer, Price};
use crr_instruments::{LatticeOptionArguments, Payoff, PricingEngine, PricingResults};
use crr_methods::BinomialTree;
use crr_models::LatticeModel;

#[cfg(not(feature = "parallel"))]
use crr_methods::lattice::{price_american as roll_back_american, price_european as roll_back_european};
#[cfg(feature = "parallel")]
use crr_methods::{
    price_american_parallel as roll_back_american, price_european_parallel as roll_back_european,
};

/// Price a European option on an `steps`-step lattice.
///
/// # Errors
/// * [`Error::InvalidSteps`](crr_core::Error::InvalidSteps) if `steps < 0`
/// * [`Error::DegenerateModel`](crr_core::Error::DegenerateModel) /
///   [`Error::ArbitrageViolation`](crr_core::Error::ArbitrageViolation)
///   if the model is not arbitrage-free
/// * [`Error::InvalidStrikeOrder`](crr_core::Error::InvalidStrikeOrder) /
///   [`Error::InvalidArgument`](crr_core::Error::InvalidArgument) if the
///   payoff does not validate
///
/// # Example
/// ```
/// use crr_instruments::Payoff;
/// use crr_models::LatticeModel;
/// use crr_pricingengines::price_european;
///
/// let model = LatticeModel::new(100.0, 0.1, -0.1, 0.05).unwrap();
/// let price = price_european(&model, 1, &Payoff::call(100.0)).unwrap();
/// assert!((price - 7.5 / 1.05).abs() < 1e-12);
/// ```
pub fn price_european(model: &LatticeModel, steps: Integer, payoff: &Payoff) -> Result<Price> {
    let _span = tracing::debug_span!("price_european", steps, payoff = %payoff).entered();
    let tree = BinomialTree::new(model, steps)?;
    let price = roll_back_european(&tree, payoff)?;
    tracing::debug!(price, "european price");
    Ok(price)
}

/// Price an American option on an `steps`-step lattice.
///
/// The holder may exercise at any node, so each interior node takes the
/// larger of its discounted continuation value and the payoff at the node's
/// own price. For every valid input the result is at least the European
/// price.
///
/// # Errors
/// Same as [`price_european`].
pub fn price_american(model: &LatticeModel, steps: Integer, payoff: &Payoff) -> Result<Price> {
    let _span = tracing::debug_span!("price_american", steps, payoff = %payoff).entered();
    let tree = BinomialTree::new(model, steps)?;
    let price = roll_back_american(&tree, payoff)?;
    tracing::debug!(price, "american price");
    Ok(price)
}

/// Binomial (CRR) pricing engine.
///
/// Prices European and American lattice options on a fixed model. Besides
/// the NPV the results carry:
///
/// | key | meaning |
/// |---|---|
/// | `risk_neutral_probability` | `q` |
/// | `discount_factor` | one-step discount `1 / (1 + R)` |
/// | `european_npv` | American only: the same payoff without early exercise |
/// | `early_exercise_premium` | American only: `npv − european_npv` |
#[derive(Debug, Clone)]
pub struct BinomialEngine {
    model: LatticeModel,
}

impl BinomialEngine {
    /// Create a new engine on the given model.
    pub fn new(model: LatticeModel) -> Self {
        Self { model }
    }

    /// The model the engine prices on.
    pub fn model(&self) -> &LatticeModel {
        &self.model
    }
}

impl PricingEngine<LatticeOptionArguments> for BinomialEngine {
    fn calculate(&self, args: &LatticeOptionArguments) -> Result<PricingResults> {
        let q = self.model.risk_neutral_probability()?;
        let european = price_european(&self.model, args.steps, &args.payoff)?;
        let results = if args.exercise.allows_early_exercise() {
            let american = price_american(&self.model, args.steps, &args.payoff)?;
            PricingResults::from_npv(american)
                .with_result("european_npv", european)
                .with_result("early_exercise_premium", american - european)
        } else {
            PricingResults::from_npv(european)
        };
        Ok(results
            .with_result("risk_neutral_probability", q)
            .with_result("discount_factor", self.model.discount_factor(1)))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crr_core::Error;
    use crr_instruments::LatticeOption;

    fn model() -> LatticeModel {
        LatticeModel::new(100.0, 0.1, -0.1, 0.05).unwrap()
    }

    #[test]
    fn one_step_call() {
        let price = price_european(&model(), 1, &Payoff::call(100.0)).unwrap();
        assert_relative_eq!(price, 7.142_857_142_857_143, epsilon = 1e-12);
    }

    #[test]
    fn negative_steps_rejected_by_both_pricers() {
        let call = Payoff::call(100.0);
        assert_eq!(
            price_european(&model(), -1, &call),
            Err(Error::InvalidSteps(-1))
        );
        assert_eq!(
            price_american(&model(), -5, &call),
            Err(Error::InvalidSteps(-5))
        );
    }

    #[test]
    fn steps_are_checked_before_payoff() {
        let bad = Payoff::Butterfly {
            lower: 110.0,
            upper: 90.0,
        };
        assert_eq!(
            price_european(&model(), -1, &bad),
            Err(Error::InvalidSteps(-1))
        );
        assert!(matches!(
            price_american(&model(), 3, &bad),
            Err(Error::InvalidStrikeOrder { .. })
        ));
    }

    #[test]
    fn engine_european_results() {
        let engine = BinomialEngine::new(model());
        let r = LatticeOption::european(Payoff::call(100.0), 1)
            .price(&engine)
            .unwrap();
        assert_relative_eq!(r.npv, 7.5 / 1.05, epsilon = 1e-12);
        assert_relative_eq!(r.result("risk_neutral_probability").unwrap(), 0.75, epsilon = 1e-15);
        assert_relative_eq!(r.result("discount_factor").unwrap(), 1.0 / 1.05, epsilon = 1e-15);
        assert!(r.result("early_exercise_premium").is_none());
    }

    #[test]
    fn engine_american_reports_premium() {
        let engine = BinomialEngine::new(model());
        let r = LatticeOption::american(Payoff::put(100.0), 2)
            .price(&engine)
            .unwrap();
        let eur = r.result("european_npv").unwrap();
        assert_relative_eq!(eur, 1.417_233_560_090_7, epsilon = 1e-9);
        assert_relative_eq!(r.npv, 2.551_020_408_163_3, epsilon = 1e-9);
        assert_relative_eq!(
            r.result("early_exercise_premium").unwrap(),
            r.npv - eur,
            epsilon = 1e-15
        );
    }

    #[test]
    fn engine_surfaces_invalid_steps() {
        let engine = BinomialEngine::new(model());
        let err = LatticeOption::american(Payoff::call(100.0), -2)
            .price(&engine)
            .unwrap_err();
        assert_eq!(err, Error::InvalidSteps(-2));
    }
}
