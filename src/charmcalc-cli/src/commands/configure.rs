//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up charmcalc defaults.

use crate::config::Config;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Handle the configure command
///
/// # Arguments
/// * `tables` - Optional tables JSON path to set as default
/// * `rarity` - Optional rarity to set as default for `prob`
/// * `show` - If true, show current configuration
pub fn handle(tables: Option<PathBuf>, rarity: Option<String>, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if tables.is_none() && rarity.is_none() {
        show_usage();
        return Ok(());
    }

    if let Some(path) = tables {
        let path = path
            .canonicalize()
            .with_context(|| format!("Tables file not found: {}", path.display()))?;
        println!("Tables configured: {}", path.display());
        config.set_tables(path);
    }
    if let Some(rarity) = rarity {
        println!("Default rarity configured: {}", rarity);
        config.set_rarity(rarity);
    }

    config.save()?;
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) {
    match config.tables_path() {
        Some(path) => println!("Tables: {}", path.display()),
        None => println!("Tables: bundled sample"),
    }
    match config.default_rarity() {
        Some(rarity) => println!("Default rarity: {}", rarity),
        None => println!("No default rarity configured"),
    }

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: charmcalc configure --set-tables PATH");
    println!("   or: charmcalc configure --rarity 'RARE[7]'");
    println!("   or: charmcalc configure --show");
}
