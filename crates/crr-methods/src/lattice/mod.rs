//! Lattice methods for option pricing.
//!
//! # Overview
//!
//! * [`BinomialTree`] — recombining CRR tree over a validated model
//! * [`price_european`] / [`price_american`] — backward-induction pricing
//! * [`roll_back`] — one level of the recursion, shared by both
//!
//! Both pricers reuse a single buffer of `N + 1` values. Level `n` is
//! computed from level `n + 1` by visiting `i = 0, 1, …, n` in ascending
//! order: `values[i]` and `values[i + 1]` are read before `values[i]` is
//! overwritten, and `values[i + 1]` is only overwritten on the next
//! iteration, after its last reader has run.

pub mod binomial_tree;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use binomial_tree::BinomialTree;

use crr_core::{Real, Result, Size};
use crr_instruments::Payoff;

// ─── Backward-induction pricing ───────────────────────────────────────────────

/// Payoff at every node of the last layer, `payoff(S(N, i))` for `i = 0..=N`.
pub fn terminal_values(tree: &BinomialTree, payoff: &Payoff) -> Vec<Real> {
    let n = tree.steps();
    (0..tree.size(n))
        .map(|i| payoff.evaluate(tree.underlying(n, i)))
        .collect()
}

/// Discounted risk-neutral average of the two children of a node.
///
/// Written as `down + q·(up − down)` so that two non-negative children near
/// [`Real::MAX`] cannot overflow the sum. The result saturates at
/// `Real::MAX`, which keeps saturated node prices finite through `R < 0`.
#[inline]
pub(crate) fn continuation(pu: Real, up: Real, down: Real, growth: Real) -> Real {
    ((down + pu * (up - down)) / growth).min(Real::MAX)
}

/// Roll `values` back from layer `level + 1` to layer `level`, in place.
///
/// On entry `values[..=level + 1]` holds layer `level + 1`; on return
/// `values[..=level]` holds layer `level`. With `early_exercise` set, each
/// node takes the larger of its continuation value and the payoff at the
/// node's own price `S(level, i)`.
///
/// # Panics
/// Panics if `values` is shorter than `level + 2`.
pub fn roll_back(
    tree: &BinomialTree,
    values: &mut [Real],
    level: Size,
    early_exercise: Option<&Payoff>,
) {
    assert!(
        values.len() > level + 1,
        "roll_back: need {} values for layer {level}, got {}",
        level + 2,
        values.len()
    );
    let pu = tree.probability(1);
    let growth = tree.growth();

    // ascending order is load-bearing, see the module docs
    for i in 0..tree.size(level) {
        let up = values[tree.descendant(level, i, 1)];
        let down = values[tree.descendant(level, i, 0)];
        let hold = continuation(pu, up, down, growth);
        values[i] = match early_exercise {
            Some(payoff) => hold.max(payoff.evaluate(tree.underlying(level, i))),
            None => hold,
        };
    }
}

/// Price a European option by backward induction on a binomial tree.
///
/// Returns the risk-neutral discounted expectation of the terminal payoff.
///
/// # Errors
/// Fails before touching the lattice if `payoff` does not validate.
pub fn price_european(tree: &BinomialTree, payoff: &Payoff) -> Result<Real> {
    payoff.validate()?;
    let mut values = terminal_values(tree, payoff);
    for level in (0..tree.steps()).rev() {
        roll_back(tree, &mut values, level, None);
    }
    Ok(values[0])
}

/// Price an American option by backward induction on a binomial tree.
///
/// Same as European pricing, but every interior node takes the larger of
/// holding and exercising at that node's own price (the Snell envelope).
///
/// # Errors
/// Fails before touching the lattice if `payoff` does not validate.
pub fn price_american(tree: &BinomialTree, payoff: &Payoff) -> Result<Real> {
    payoff.validate()?;
    let mut values = terminal_values(tree, payoff);
    for level in (0..tree.steps()).rev() {
        roll_back(tree, &mut values, level, Some(payoff));
    }
    Ok(values[0])
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crr_core::Error;
    use crr_models::LatticeModel;
    use proptest::prelude::*;

    fn tree(steps: i32) -> BinomialTree {
        let model = LatticeModel::new(100.0, 0.1, -0.1, 0.05).unwrap();
        BinomialTree::new(&model, steps).unwrap()
    }

    /// Level-by-level reference that allocates a fresh layer each step.
    fn roll_back_fresh(t: &BinomialTree, values: &[Real], level: Size) -> Vec<Real> {
        (0..=level)
            .map(|i| (t.probability(1) * values[i + 1] + t.probability(0) * values[i]) / t.growth())
            .collect()
    }

    #[test]
    fn one_step_european_call_worked_example() {
        let price = price_european(&tree(1), &Payoff::call(100.0)).unwrap();
        assert_relative_eq!(price, 7.5 / 1.05, epsilon = 1e-12);
        assert_relative_eq!(price, 7.142_857_142_857, epsilon = 1e-9);
    }

    #[test]
    fn two_step_put_european_vs_american() {
        // terminal prices 81, 99, 121; put payoffs 19, 1, 0
        let put = Payoff::put(100.0);
        let eur = price_european(&tree(2), &put).unwrap();
        let am = price_american(&tree(2), &put).unwrap();
        assert_relative_eq!(eur, 1.417_233_560_090_7, epsilon = 1e-9);
        // exercising at S(1, 0) = 90 beats holding (10 > 5.238…)
        assert_relative_eq!(am, 2.551_020_408_163_3, epsilon = 1e-9);
    }

    #[test]
    fn zero_steps_returns_payoff_at_spot() {
        let t = tree(0);
        assert_relative_eq!(price_european(&t, &Payoff::put(110.0)).unwrap(), 10.0);
        assert_relative_eq!(price_american(&t, &Payoff::put(110.0)).unwrap(), 10.0);
        assert_eq!(price_european(&t, &Payoff::call(110.0)).unwrap(), 0.0);
    }

    #[test]
    fn american_call_matches_european_with_positive_rate() {
        let call = Payoff::call(95.0);
        for steps in [1, 5, 20, 75] {
            let t = tree(steps);
            let eur = price_european(&t, &call).unwrap();
            let am = price_american(&t, &call).unwrap();
            assert_relative_eq!(am, eur, epsilon = 1e-10);
        }
    }

    #[test]
    fn digital_prices_are_bounded_by_discounted_unit() {
        let t = tree(30);
        let disc = t.model().discount_factor(30);
        let dc = price_european(&t, &Payoff::digital_call(100.0)).unwrap();
        let dp = price_european(&t, &Payoff::digital_put(100.0)).unwrap();
        assert!(dc > 0.0 && dc < disc);
        assert!(dp > 0.0 && dp < disc);
        // mass sitting exactly on z == K pays neither digital
        assert!(dc + dp <= disc + 1e-12);
    }

    #[test]
    fn invalid_payoff_fails_before_pricing() {
        let bad = Payoff::BullSpread {
            lower: 110.0,
            upper: 90.0,
        };
        assert!(matches!(
            price_european(&tree(5), &bad),
            Err(Error::InvalidStrikeOrder { .. })
        ));
        assert!(matches!(
            price_american(&tree(5), &bad),
            Err(Error::InvalidStrikeOrder { .. })
        ));
    }

    #[test]
    fn saturated_children_stay_finite_under_negative_rate() {
        let model = LatticeModel::new(100.0, 0.5, -0.5, -0.1).unwrap();
        let t = BinomialTree::new(&model, 1).unwrap();
        let mut values = vec![Real::MAX, Real::MAX];
        roll_back(&t, &mut values, 0, None);
        assert_eq!(values[0], Real::MAX);
    }

    #[test]
    #[should_panic(expected = "roll_back")]
    fn roll_back_rejects_short_buffer() {
        let t = tree(3);
        let mut values = vec![0.0; 3];
        roll_back(&t, &mut values, 2, None);
    }

    proptest! {
        #[test]
        fn in_place_roll_back_matches_fresh_layer(
            layer in proptest::collection::vec(-50.0f64..50.0, 2..40),
        ) {
            let t = tree(64);
            let level = layer.len() - 2;
            let expected = roll_back_fresh(&t, &layer, level);
            let mut values = layer.clone();
            roll_back(&t, &mut values, level, None);
            for i in 0..=level {
                prop_assert!((values[i] - expected[i]).abs() < 1e-12);
            }
            // the slot past the new layer still holds its old value
            prop_assert_eq!(values[level + 1], layer[level + 1]);
        }

        #[test]
        fn american_dominates_european_for_every_kind(
            steps in 0i32..40,
            k1 in 60.0f64..140.0,
            width in 1.0f64..40.0,
        ) {
            let t = tree(steps);
            for kind in crr_instruments::PayoffKind::ALL {
                let payoff = Payoff::from_strikes(kind, &[k1, k1 + width]).unwrap();
                let eur = price_european(&t, &payoff).unwrap();
                let am = price_american(&t, &payoff).unwrap();
                prop_assert!(am >= eur - 1e-9, "{}: american {} < european {}", payoff, am, eur);
            }
        }
    }
}
