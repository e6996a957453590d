//! Charm probability engine
//!
//! Matches selected skills to template slots, scores each placement with
//! base-name exclusion, and rolls the result up through rarity, template,
//! and slot pattern probabilities.

mod aggregate;
mod availability;
mod exclusion;
mod matcher;
mod search;

pub use aggregate::{compute_charm_probability, ProbabilityResult, MISSING_RARITY_PROBABILITY};
pub use availability::pool_size;
pub use exclusion::{score_assignment, score_assignment_in_order, GroupBreakdown, Score};
pub use matcher::{best_assignment, dedup_assignments, find_assignments, placed_count, Assignment};
pub use search::{rank_charms, CharmRanking, RankedCharm};

use crate::tables::GroupId;
use serde::Serialize;

/// A permissive fallback taken because the tables lacked something
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataWarning {
    /// Rarity unknown; base probability defaulted
    MissingRarity { rarity: String },
    /// Group unknown; pool size defaulted to 1
    MissingGroup { group: GroupId },
    /// Group never drawn by this rarity; pool size defaulted to 1
    GroupNotInRarity { group: GroupId, rarity: String },
    /// Slot pattern not listed for this rarity; slot probability defaulted to 1
    MissingSlotPattern { rarity: String, pattern: String },
}

impl std::fmt::Display for DataWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataWarning::MissingRarity { rarity } => write!(
                f,
                "unknown rarity {}, using base probability {}",
                rarity, MISSING_RARITY_PROBABILITY
            ),
            DataWarning::MissingGroup { group } => {
                write!(f, "unknown skill group {}, using pool size 1", group)
            }
            DataWarning::GroupNotInRarity { group, rarity } => write!(
                f,
                "skill group {} is not drawn by {}, using pool size 1",
                group, rarity
            ),
            DataWarning::MissingSlotPattern { rarity, pattern } => write!(
                f,
                "slot pattern {} not listed for {}, using slot probability 1",
                pattern, rarity
            ),
        }
    }
}

pub(crate) fn push_warning(warnings: &mut Vec<DataWarning>, warning: DataWarning) {
    if !warnings.contains(&warning) {
        warnings.push(warning);
    }
}
