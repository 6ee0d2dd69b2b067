//! Option exercise styles.
//!
//! An `ExerciseType` defines *when* an option can be exercised on the
//! lattice.

use crr_core::Error;
use std::fmt;
use std::str::FromStr;

/// Type of exercise right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExerciseType {
    /// Can only be exercised at expiry (step `N`).
    European,
    /// Can be exercised at any step `0..=N`.
    American,
}

impl ExerciseType {
    /// Whether exercise before expiry is allowed.
    pub fn allows_early_exercise(self) -> bool {
        matches!(self, ExerciseType::American)
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseType::European => write!(f, "European"),
            ExerciseType::American => write!(f, "American"),
        }
    }
}

impl FromStr for ExerciseType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "european" | "eur" => Ok(ExerciseType::European),
            "american" | "am" => Ok(ExerciseType::American),
            other => Err(Error::InvalidArgument(format!(
                "unknown exercise style '{other}' (expected european or american)"
            ))),
        }
    }
}
