//! Ranking every charm shape for one selection

use super::aggregate::{compute_charm_probability, ProbabilityResult};
use crate::selection::{CharmDescriptor, SelectionState};
use crate::tables::CharmTables;
use serde::Serialize;

/// One charm shape able to carry the selection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCharm {
    pub charm: CharmDescriptor,
    /// Templates of the rarity sharing this group list
    pub template_count: usize,
    pub result: ProbabilityResult,
    /// Chance a single drop is this shape and carries the selection
    pub weighted_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharmRanking {
    /// Highest `weighted_probability` first
    pub charms: Vec<RankedCharm>,
    /// Chance a single drop carries the selection in any shape
    pub total_probability: f64,
}

/// Score every distinct (rarity, group list) against `selection`.
///
/// Shapes with zero probability are left out. `rarity_filter` limits the
/// search to one rarity id.
pub fn rank_charms(
    tables: &CharmTables,
    selection: &SelectionState,
    rarity_filter: Option<&str>,
) -> CharmRanking {
    let mut charms = Vec::new();

    for rarity in tables.rarities() {
        if rarity_filter.is_some_and(|id| id != rarity.id) {
            continue;
        }

        let mut shapes: Vec<(CharmDescriptor, usize)> = Vec::new();
        for template in &rarity.templates {
            let charm = CharmDescriptor::from_template(rarity, template);
            match shapes.iter_mut().find(|(c, _)| *c == charm) {
                Some((_, count)) => *count += 1,
                None => shapes.push((charm, 1)),
            }
        }

        for (charm, template_count) in shapes {
            let result = compute_charm_probability(tables, &charm, selection);
            if !result.is_possible() {
                continue;
            }
            let weighted_probability =
                result.final_probability_including_slot * template_count as f64;
            charms.push(RankedCharm {
                charm,
                template_count,
                result,
                weighted_probability,
            });
        }
    }

    charms.sort_by(|a, b| b.weighted_probability.total_cmp(&a.weighted_probability));
    let total_probability: f64 = charms.iter().map(|c| c.weighted_probability).sum();

    tracing::debug!(
        "{} charm shapes can carry the selection, total {}",
        charms.len(),
        total_probability
    );

    CharmRanking {
        charms,
        total_probability,
    }
}
