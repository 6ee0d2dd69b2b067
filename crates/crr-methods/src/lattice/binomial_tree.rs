//! Recombining binomial tree over a [`LatticeModel`].
//!
//! The tree has `steps + 1` time layers, with layer `n` having `n + 1` nodes.
//! Node `(n, i)` is the state after `i` up-moves and `n − i` down-moves.
//! Nodes are never materialised; prices are computed on demand from the
//! model.

use crr_core::{ensure, Error, Integer, Price, Real, Result, Size};
use crr_models::LatticeModel;

/// A CRR binomial tree with a fixed number of steps.
///
/// Construction validates the step count and derives the risk-neutral
/// branch probabilities once, so every subsequent query is infallible.
#[derive(Debug, Clone)]
pub struct BinomialTree {
    model: LatticeModel,
    steps: Size,
    pu: Real,
    pd: Real,
    growth: Real,
}

impl BinomialTree {
    /// Build an `steps`-step tree on `model`.
    ///
    /// # Errors
    /// * [`Error::InvalidSteps`] if `steps < 0`
    /// * [`Error::DegenerateModel`] / [`Error::ArbitrageViolation`] if the
    ///   model's risk-neutral probability is undefined or outside `(0, 1)`
    pub fn new(model: &LatticeModel, steps: Integer) -> Result<Self> {
        ensure!(steps >= 0, Error::InvalidSteps(steps));
        let pu = model.risk_neutral_probability()?;
        let tree = Self {
            model: *model,
            steps: steps as Size,
            pu,
            pd: 1.0 - pu,
            growth: model.growth(),
        };
        tracing::debug!(steps = tree.steps, q = pu, growth = tree.growth, "binomial tree built");
        Ok(tree)
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// The underlying model.
    pub fn model(&self) -> &LatticeModel {
        &self.model
    }

    /// Number of time steps `N`.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Number of nodes at time step `n` (always `n + 1`).
    pub fn size(&self, n: Size) -> Size {
        n + 1
    }

    /// Index of the descendant node at step `n+1` for a given `branch`.
    ///
    /// `branch = 0` → down, `branch = 1` → up.
    pub fn descendant(&self, _n: Size, index: Size, branch: Size) -> Size {
        index + branch
    }

    /// Underlying price at node `(n, index)`.
    pub fn underlying(&self, n: Size, index: Size) -> Price {
        self.model.node_price(n, index)
    }

    /// Transition probability for `branch` (0 = down, 1 = up).
    pub fn probability(&self, branch: Size) -> Real {
        if branch == 1 {
            self.pu
        } else {
            self.pd
        }
    }

    /// One-step cash growth `1 + R`; continuation values are divided by it.
    pub fn growth(&self) -> Real {
        self.growth
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
