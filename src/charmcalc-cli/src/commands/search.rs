//! Charm ranking command handler

use super::{format_probability, print_json};
use crate::cli::SelectionArgs;
use anyhow::{bail, Result};
use charmcalc::{rank_charms, CharmRanking, CharmTables};

/// Handle the search command
pub fn handle(
    tables: &CharmTables,
    rarity: Option<&str>,
    limit: usize,
    selection: &SelectionArgs,
    json: bool,
) -> Result<()> {
    if let Some(id) = rarity {
        if tables.rarity(id).is_none() {
            bail!("Unknown rarity '{}'. Try 'charmcalc rarities'", id);
        }
    }

    let selection = selection.to_selection();
    let ranking = rank_charms(tables, &selection, rarity);

    if json {
        return print_json(&ranking);
    }

    if ranking.charms.is_empty() {
        println!("No charm can carry the selected skills");
        return Ok(());
    }
    print_ranking(&ranking, limit);
    Ok(())
}

fn print_ranking(ranking: &CharmRanking, limit: usize) {
    println!(
        "{:<4} {:<24} {:>9} {:>30}",
        "#", "Charm", "Templates", "Probability"
    );
    println!("{}", "-".repeat(70));

    for (i, ranked) in ranking.charms.iter().take(limit).enumerate() {
        println!(
            "{:<4} {:<24} {:>9} {:>30}",
            i + 1,
            ranked.charm.to_string(),
            ranked.template_count,
            format_probability(ranked.weighted_probability)
        );
    }

    if ranking.charms.len() > limit {
        println!("... {} more", ranking.charms.len() - limit);
    }
    println!();
    println!("Any charm: {}", format_probability(ranking.total_probability));
}
