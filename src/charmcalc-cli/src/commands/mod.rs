//! Command handlers for charmcalc CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod fraction;
pub mod prob;
pub mod search;
pub mod tables;

use crate::config::Config;
use anyhow::{Context, Result};
use charmcalc::CharmTables;
use std::borrow::Cow;
use std::path::Path;

/// Resolve tables from `--tables`, then the config file, then the bundled sample
pub fn load_tables(explicit: Option<&Path>, config: &Config) -> Result<Cow<'static, CharmTables>> {
    match explicit.or(config.tables_path()) {
        Some(path) => {
            let tables = CharmTables::load(path)
                .with_context(|| format!("Failed to load tables from {}", path.display()))?;
            Ok(Cow::Owned(tables))
        }
        None => {
            tracing::debug!("No tables path given, using bundled sample");
            let tables = CharmTables::sample().context("Failed to load bundled sample tables")?;
            Ok(Cow::Borrowed(tables))
        }
    }
}

/// Print a value as pretty JSON
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Probability with its display fraction, e.g. `0.125 (1/8)`
pub fn format_probability(p: f64) -> String {
    format!("{:.6e} ({})", p, charmcalc::decimal_to_fraction_default(p))
}
