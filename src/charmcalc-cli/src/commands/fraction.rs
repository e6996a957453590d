//! Fraction formatting command handler

use super::print_json;
use anyhow::Result;
use charmcalc::Fraction;
use serde::Serialize;

#[derive(Serialize)]
struct FractionOutput {
    value: f64,
    fraction: Fraction,
    display: String,
}

/// Handle the fraction command
pub fn handle(value: f64, max_denominator: u64, json: bool) -> Result<()> {
    let fraction = Fraction::approximate(value, max_denominator);

    if json {
        return print_json(&FractionOutput {
            value,
            fraction,
            display: fraction.to_string(),
        });
    }

    println!("{}", fraction);
    Ok(())
}
