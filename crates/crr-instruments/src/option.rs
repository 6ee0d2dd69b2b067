//! Options priced on an `N`-step lattice.
//!
//! A [`LatticeOption`] is a payoff, an exercise style, and the number of
//! lattice steps to expiry. Engines receive it as [`LatticeOptionArguments`].

use crate::exercise::ExerciseType;
use crate::instrument::{PricingEngine, PricingResults};
use crate::payoff::Payoff;
use crr_core::{errors::Result, Integer};
use std::fmt;

/// Arguments needed for pricing a lattice option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeOptionArguments {
    /// The payoff.
    pub payoff: Payoff,
    /// The exercise style.
    pub exercise: ExerciseType,
    /// Steps to expiry `N`.
    pub steps: Integer,
}

/// A path-independent option on a single underlying.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeOption {
    payoff: Payoff,
    exercise: ExerciseType,
    steps: Integer,
}

impl LatticeOption {
    /// Create a new option. Nothing is validated until it is priced.
    pub fn new(payoff: Payoff, exercise: ExerciseType, steps: Integer) -> Self {
        Self {
            payoff,
            exercise,
            steps,
        }
    }

    /// Convenience: European exercise.
    pub fn european(payoff: Payoff, steps: Integer) -> Self {
        Self::new(payoff, ExerciseType::European, steps)
    }

    /// Convenience: American exercise.
    pub fn american(payoff: Payoff, steps: Integer) -> Self {
        Self::new(payoff, ExerciseType::American, steps)
    }

    /// The payoff.
    pub fn payoff(&self) -> &Payoff {
        &self.payoff
    }

    /// The exercise style.
    pub fn exercise(&self) -> ExerciseType {
        self.exercise
    }

    /// Steps to expiry.
    pub fn steps(&self) -> Integer {
        self.steps
    }

    /// Get the arguments for a pricing engine.
    pub fn arguments(&self) -> LatticeOptionArguments {
        LatticeOptionArguments {
            payoff: self.payoff,
            exercise: self.exercise,
            steps: self.steps,
        }
    }

    /// Price this option using the given engine.
    pub fn price(
        &self,
        engine: &dyn PricingEngine<LatticeOptionArguments>,
    ) -> Result<PricingResults> {
        engine.calculate(&self.arguments())
    }
}

impl fmt::Display for LatticeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} (N={})", self.exercise, self.payoff, self.steps)
    }
}
