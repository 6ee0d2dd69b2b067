//! Price command implementation
//!
//! Prices a single option from command-line arguments.

use tracing::info;

use crate::Result;
use crr_instruments::{LatticeOption, PricingResults};
use crr_models::LatticeModel;
use crr_pricingengines::BinomialEngine;

/// Additional results worth showing, in display order.
const REPORTED: [&str; 4] = [
    "risk_neutral_probability",
    "discount_factor",
    "european_npv",
    "early_exercise_premium",
];

/// Price `option` on `model` with the binomial engine.
pub fn price(model: &LatticeModel, option: &LatticeOption) -> Result<PricingResults> {
    let engine = BinomialEngine::new(*model);
    Ok(option.price(&engine)?)
}

/// Render one priced option as an indented block.
pub fn render(option: &LatticeOption, results: &PricingResults) -> String {
    let mut out = format!("{option}\n  {:<26} {:.10}\n", "npv", results.npv);
    for key in REPORTED {
        if let Some(value) = results.result(key) {
            out.push_str(&format!("  {key:<26} {value:.10}\n"));
        }
    }
    out
}

/// Run the price command
pub fn run(model: &LatticeModel, option: &LatticeOption) -> Result<()> {
    info!(%model, %option, "pricing");
    let results = price(model, option)?;
    println!("{model}");
    print!("{}", render(option, &results));
    Ok(())
}
