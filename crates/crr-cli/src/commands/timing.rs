//! Timing command implementation
//!
//! Prices an American call for each step count and reports the wall-clock
//! time of each run.

use std::time::{Duration, Instant};

use tracing::info;

use crate::Result;
use crr_core::{Integer, Price, Real};
use crr_instruments::Payoff;
use crr_models::LatticeModel;
use crr_pricingengines::price_american;

/// One row of the sweep.
#[derive(Debug, Clone, Copy)]
pub struct TimingRow {
    pub steps: Integer,
    pub price: Price,
    pub elapsed: Duration,
}

/// Price an American call with `strike` once per entry of `steps`.
pub fn sweep(model: &LatticeModel, strike: Real, steps: &[Integer]) -> Result<Vec<TimingRow>> {
    let call = Payoff::call(strike);
    steps
        .iter()
        .map(|&n| -> Result<TimingRow> {
            let start = Instant::now();
            let price = price_american(model, n, &call)?;
            Ok(TimingRow {
                steps: n,
                price,
                elapsed: start.elapsed(),
            })
        })
        .collect()
}

/// Run the timing command
pub fn run(model: &LatticeModel, strike: Real, steps: &[Integer]) -> Result<()> {
    info!(%model, strike, runs = steps.len(), "timing sweep");
    let rows = sweep(model, strike, steps)?;
    println!("American Call(K={strike})");
    println!("{:>8}  {:>16}  {:>12}", "N", "price", "elapsed");
    for row in rows {
        println!(
            "{:>8}  {:>16.10}  {:>12.3?}",
            row.steps, row.price, row.elapsed
        );
    }
    Ok(())
}
