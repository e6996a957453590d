//! CLI argument definitions for charmcalc
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

mod core;
mod selection;

pub use core::{Cli, Commands};
pub use selection::SelectionArgs;
