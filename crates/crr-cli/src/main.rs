//! crr - command-line front end for the CRR binomial pricer
//!
//! # Commands
//!
//! - `crr price --kind call --strike 100 --steps 3` - price one option
//! - `crr batch --config batch.toml` - price every option in a TOML file
//! - `crr timing --steps 3,50,100` - time an American call across step counts
//!
//! Model parameters default to `S0=100, U=0.1, D=-0.1, R=0.05`; `--s0`,
//! `--up`, `--down` and `--rate` override them (and the `[model]` section of
//! a batch file).

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::{ModelConfig, ModelOverrides, DEFAULT_TIMING_STEPS, DEFAULT_TIMING_STRIKE};
use crr_core::{Integer, Real};
use crr_instruments::{ExerciseType, LatticeOption, Payoff, PayoffKind};

/// Binomial (Cox-Ross-Rubinstein) option pricer
#[derive(Parser)]
#[command(name = "crr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", env = "CRR_LOG_LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a single option
    Price {
        #[command(flatten)]
        model: ModelOverrides,

        /// Payoff kind (call, put, digital-call, digital-put, double-digital,
        /// bull-spread, bear-spread, butterfly, strangle)
        #[arg(short, long)]
        kind: PayoffKind,

        /// Strike(s); two-strike kinds take lower then upper
        #[arg(short = 'K', long = "strike", num_args = 1..=2, required = true)]
        strikes: Vec<Real>,

        /// Number of lattice steps N
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        steps: Integer,

        /// Exercise style (european, american)
        #[arg(short, long, default_value = "european")]
        exercise: ExerciseType,
    },

    /// Price every option listed in a TOML batch file
    Batch {
        /// Path to the batch file
        #[arg(short, long)]
        config: PathBuf,

        #[command(flatten)]
        model: ModelOverrides,
    },

    /// Time an American call across a range of step counts
    Timing {
        #[command(flatten)]
        model: ModelOverrides,

        /// Comma-separated step counts
        #[arg(
            short = 'n',
            long,
            value_delimiter = ',',
            allow_negative_numbers = true,
            default_values_t = DEFAULT_TIMING_STEPS
        )]
        steps: Vec<Integer>,

        /// Call strike
        #[arg(short = 'K', long, default_value_t = DEFAULT_TIMING_STRIKE)]
        strike: Real,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialise tracing; RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
    debug!(log_level = %cli.log_level, "tracing initialised");

    match cli.command {
        Commands::Price {
            model,
            kind,
            strikes,
            steps,
            exercise,
        } => {
            let model = ModelConfig::default().with_overrides(&model).to_model()?;
            let payoff = Payoff::from_strikes(kind, &strikes)?;
            commands::price::run(&model, &LatticeOption::new(payoff, exercise, steps))
        }
        Commands::Batch { config, model } => commands::batch::run(&config, &model),
        Commands::Timing {
            model,
            steps,
            strike,
        } => {
            let model = ModelConfig::default().with_overrides(&model).to_model()?;
            commands::timing::run(&model, strike, &steps)
        }
    }
}
