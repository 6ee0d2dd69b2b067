//! Level-parallel backward induction (feature `parallel`).
//!
//! Within one layer every node depends only on two nodes of the next layer,
//! so the nodes of a layer are split across rayon workers. Layers stay
//! strictly sequential: each one is written into a second buffer and the
//! buffers are swapped only after the whole layer has been joined.
//!
//! Small layers fall back to the sequential in-place [`roll_back`].

use rayon::prelude::*;

use super::{continuation, roll_back, terminal_values, BinomialTree};
use crr_core::{Real, Result, Size};
use crr_instruments::Payoff;

/// Layers with fewer nodes than this are rolled back sequentially.
pub const PARALLEL_THRESHOLD: Size = 2048;

/// Minimum number of nodes handed to one rayon task.
const MIN_CHUNK: Size = 512;

fn roll_back_all(tree: &BinomialTree, payoff: &Payoff, early_exercise: bool) -> Result<Real> {
    payoff.validate()?;
    let exercise = early_exercise.then_some(payoff);
    let pu = tree.probability(1);
    let growth = tree.growth();

    let mut values = terminal_values(tree, payoff);
    let mut next = vec![0.0; values.len()];

    for level in (0..tree.steps()).rev() {
        let size = tree.size(level);
        if size < PARALLEL_THRESHOLD {
            roll_back(tree, &mut values, level, exercise);
            continue;
        }
        let prev = &values;
        next[..size]
            .par_iter_mut()
            .with_min_len(MIN_CHUNK)
            .enumerate()
            .for_each(|(i, slot)| {
                let hold = continuation(pu, prev[i + 1], prev[i], growth);
                *slot = match exercise {
                    Some(p) => hold.max(p.evaluate(tree.underlying(level, i))),
                    None => hold,
                };
            });
        std::mem::swap(&mut values, &mut next);
    }
    Ok(values[0])
}

/// Parallel counterpart of [`price_european`](super::price_european).
///
/// # Errors
/// Fails before touching the lattice if `payoff` does not validate.
pub fn price_european_parallel(tree: &BinomialTree, payoff: &Payoff) -> Result<Real> {
    roll_back_all(tree, payoff, false)
}

/// Parallel counterpart of [`price_american`](super::price_american).
///
/// # Errors
/// Fails before touching the lattice if `payoff` does not validate.
pub fn price_american_parallel(tree: &BinomialTree, payoff: &Payoff) -> Result<Real> {
    roll_back_all(tree, payoff, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{price_american, price_european};
    use approx::assert_relative_eq;
    use crr_models::LatticeModel;

    #[test]
    fn parallel_agrees_with_sequential_above_threshold() {
        let model = LatticeModel::new(100.0, 0.01, -0.01, 0.0005).unwrap();
        let tree = BinomialTree::new(&model, 5000).unwrap();
        for payoff in [
            Payoff::put(100.0),
            Payoff::call(105.0),
            Payoff::butterfly(90.0, 110.0).unwrap(),
        ] {
            let eur = price_european(&tree, &payoff).unwrap();
            let am = price_american(&tree, &payoff).unwrap();
            assert_relative_eq!(
                price_european_parallel(&tree, &payoff).unwrap(),
                eur,
                epsilon = 1e-10
            );
            assert_relative_eq!(
                price_american_parallel(&tree, &payoff).unwrap(),
                am,
                epsilon = 1e-10
            );
        }
    }

    #[test]
    fn small_trees_take_the_sequential_path() {
        let model = LatticeModel::new(100.0, 0.1, -0.1, 0.05).unwrap();
        let tree = BinomialTree::new(&model, 1).unwrap();
        let price = price_european_parallel(&tree, &Payoff::call(100.0)).unwrap();
        assert_relative_eq!(price, 7.5 / 1.05, epsilon = 1e-12);
    }
}
