//! Batch command implementation
//!
//! Prices every option listed in a TOML batch file, then runs the timing
//! sweep if the file has a `[timing]` section.

use std::path::Path;

use tracing::{info, warn};

use super::{price, timing};
use crate::config::{BatchConfig, ModelOverrides};
use crate::{CliError, Result};

/// Run the batch command
///
/// Every option is attempted. Options that fail are reported and the
/// command returns the first failure once the batch is done.
pub fn run(path: &Path, overrides: &ModelOverrides) -> Result<()> {
    info!(path = %path.display(), "loading batch config");
    let config = BatchConfig::from_file(path)?;
    let model = config.model.with_overrides(overrides).to_model()?;
    println!("{model}");

    let mut first_error: Option<CliError> = None;
    for (index, entry) in config.options.iter().enumerate() {
        let outcome = entry
            .to_option()
            .map_err(CliError::from)
            .and_then(|option| price::price(&model, &option).map(|r| (option, r)));
        match outcome {
            Ok((option, results)) => print!("{}", price::render(&option, &results)),
            Err(err) => {
                warn!(index, kind = %entry.kind, error = %err, "option failed");
                println!("option #{index} ({}): {err}", entry.kind);
                first_error.get_or_insert(err);
            }
        }
    }

    if let Some(sweep) = &config.timing {
        timing::run(&model, sweep.strike, &sweep.steps)?;
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
