//! CLI error types.

use thiserror::Error;

/// Errors surfaced by the `crr` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Model, payoff, or step validation failed in the pricing core.
    #[error("pricing error: {0}")]
    Pricing(#[from] crr_core::Error),

    /// The batch file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The batch file is not valid TOML for a batch config.
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The config parsed but is incomplete or inconsistent.
    #[error("invalid config: {0}")]
    Config(String),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
