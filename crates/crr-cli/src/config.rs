//! Batch configuration.
//!
//! A batch file describes one model and the options to price on it:
//!
//! ```toml
//! [model]
//! s0 = 100.0
//! up = 0.1
//! down = -0.1
//! rate = 0.05
//!
//! [[options]]
//! kind = "call"
//! strikes = [100.0]
//! steps = 3
//!
//! [[options]]
//! kind = "butterfly"
//! strikes = [90.0, 110.0]
//! steps = 50
//! exercise = "american"
//!
//! [timing]
//! steps = [3, 50, 100, 1000, 5000]
//! strike = 100.0
//! ```
//!
//! Missing model fields fall back to [`ModelConfig::default`]. Command-line
//! flags override the file through [`ModelOverrides`].

use std::path::Path;

use clap::Args;
use serde::Deserialize;

use crate::error::{CliError, Result};
use crr_core::{Integer, Real};
use crr_instruments::{ExerciseType, LatticeOption, Payoff, PayoffKind};
use crr_models::LatticeModel;

/// Default step counts for the timing sweep.
pub const DEFAULT_TIMING_STEPS: [Integer; 5] = [3, 50, 100, 1000, 5000];

/// Default strike for the timing sweep.
pub const DEFAULT_TIMING_STRIKE: Real = 100.0;

/// Top-level batch file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub options: Vec<OptionConfig>,
    pub timing: Option<TimingConfig>,
}

/// Lattice model parameters, unvalidated.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    pub s0: Real,
    pub up: Real,
    pub down: Real,
    pub rate: Real,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            s0: 100.0,
            up: 0.1,
            down: -0.1,
            rate: 0.05,
        }
    }
}

impl ModelConfig {
    /// Replace every field the overrides set.
    pub fn with_overrides(self, overrides: &ModelOverrides) -> Self {
        Self {
            s0: overrides.s0.unwrap_or(self.s0),
            up: overrides.up.unwrap_or(self.up),
            down: overrides.down.unwrap_or(self.down),
            rate: overrides.rate.unwrap_or(self.rate),
        }
    }

    /// Validate into a [`LatticeModel`].
    pub fn to_model(&self) -> crr_core::Result<LatticeModel> {
        LatticeModel::new(self.s0, self.up, self.down, self.rate)
    }
}

/// Model parameters given on the command line.
#[derive(Debug, Clone, Default, Args)]
pub struct ModelOverrides {
    /// Initial stock price S0
    #[arg(long)]
    pub s0: Option<Real>,

    /// Up-move return U
    #[arg(long, allow_negative_numbers = true)]
    pub up: Option<Real>,

    /// Down-move return D
    #[arg(long, allow_negative_numbers = true)]
    pub down: Option<Real>,

    /// Per-step risk-free rate R
    #[arg(long, allow_negative_numbers = true)]
    pub rate: Option<Real>,
}

/// One option request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionConfig {
    pub kind: String,
    pub strikes: Vec<Real>,
    pub steps: Integer,
    #[serde(default = "default_exercise")]
    pub exercise: String,
}

fn default_exercise() -> String {
    "european".to_string()
}

impl OptionConfig {
    /// Parse kind and exercise style and build the payoff.
    pub fn to_option(&self) -> crr_core::Result<LatticeOption> {
        let kind: PayoffKind = self.kind.parse()?;
        let exercise: ExerciseType = self.exercise.parse()?;
        let payoff = Payoff::from_strikes(kind, &self.strikes)?;
        Ok(LatticeOption::new(payoff, exercise, self.steps))
    }
}

/// Parameters of the timing sweep.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    pub steps: Vec<Integer>,
    pub strike: Real,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_TIMING_STEPS.to_vec(),
            strike: DEFAULT_TIMING_STRIKE,
        }
    }
}

impl BatchConfig {
    /// Parse a batch config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BatchConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a batch config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject files that would price nothing.
    pub fn validate(&self) -> Result<()> {
        if self.options.is_empty() && self.timing.is_none() {
            return Err(CliError::Config(
                "no [[options]] and no [timing] section".to_string(),
            ));
        }
        if let Some(timing) = &self.timing {
            if timing.steps.is_empty() {
                return Err(CliError::Config("[timing] steps is empty".to_string()));
            }
        }
        Ok(())
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
