mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "charmcalc=debug,charmcalc_cli=debug"
    } else {
        "charmcalc=warn,charmcalc_cli=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Configure {
            tables,
            rarity,
            show,
        } => {
            commands::configure::handle(tables, rarity, show)?;
        }

        Commands::Fraction {
            value,
            max_denominator,
        } => {
            commands::fraction::handle(value, max_denominator, cli.json)?;
        }

        command => {
            let config = Config::load()?;
            let tables = commands::load_tables(cli.tables.as_deref(), &config)?;

            match command {
                Commands::Prob {
                    rarity,
                    groups,
                    selection,
                } => {
                    commands::prob::handle(&tables, &config, rarity, groups, &selection, cli.json)?;
                }

                Commands::Search {
                    rarity,
                    limit,
                    selection,
                } => {
                    commands::search::handle(&tables, rarity.as_deref(), limit, &selection, cli.json)?;
                }

                Commands::Groups { id, find } => {
                    commands::tables::groups(&tables, id, find.as_deref(), cli.json)?;
                }

                Commands::Rarities { slots } => {
                    commands::tables::rarities(&tables, slots, cli.json)?;
                }

                Commands::Check => {
                    commands::tables::check(&tables, cli.json)?;
                }

                Commands::Configure { .. } | Commands::Fraction { .. } => {}
            }
        }
    }

    Ok(())
}
