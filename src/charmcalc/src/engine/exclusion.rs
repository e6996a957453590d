//! Exclusion-aware scoring of one assignment
//!
//! A charm never carries the same base skill twice, so each slot draws from
//! its pool minus the entries sharing a base name with skills already
//! placed in earlier slots.

use super::availability::resolve_pool_size;
use super::matcher::Assignment;
use super::{push_warning, DataWarning};
use crate::skill::SkillKey;
use crate::tables::{CharmTables, GroupId};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// How one slot's draw was scored
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBreakdown {
    /// Template slot index
    pub slot: usize,
    pub group_id: GroupId,
    pub skill: SkillKey,
    pub total_pool_size: usize,
    pub available_pool_size: usize,
    /// Base names already used by earlier slots that this pool contains
    pub excluded_base_names: BTreeSet<String>,
}

/// Probability of one assignment and its per-slot breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Score {
    pub probability: f64,
    /// Sorted by slot
    pub breakdown: Vec<GroupBreakdown>,
    pub warnings: Vec<DataWarning>,
}

/// Score an assignment processing slots in template order
pub fn score_assignment(
    tables: &CharmTables,
    assignment: &Assignment,
    group_slots: &[GroupId],
    rarity: &str,
) -> Score {
    let order: Vec<usize> = (0..group_slots.len()).collect();
    score_assignment_in_order(tables, assignment, group_slots, rarity, &order)
}

/// Score an assignment processing slots in the given order.
///
/// Slots without a skill contribute a factor of 1. Indices outside the
/// assignment or the group list are ignored.
pub fn score_assignment_in_order(
    tables: &CharmTables,
    assignment: &Assignment,
    group_slots: &[GroupId],
    rarity: &str,
    order: &[usize],
) -> Score {
    let mut used: HashSet<String> = HashSet::new();
    let mut probability = 1.0;
    let mut breakdown = Vec::new();
    let mut warnings = Vec::new();

    for &slot in order {
        let (Some(Some(key)), Some(&group_id)) = (assignment.get(slot), group_slots.get(slot))
        else {
            continue;
        };

        let (total_pool_size, warning) = resolve_pool_size(tables, group_id, rarity);
        if let Some(warning) = warning {
            push_warning(&mut warnings, warning);
        }

        let (excluded_count, excluded_base_names) = match tables.group(group_id) {
            Some(group) => {
                let names: BTreeSet<String> = group
                    .skills
                    .iter()
                    .filter(|s| used.contains(s.name.as_str()))
                    .map(|s| s.name.clone())
                    .collect();
                (group.count_named(&used), names)
            }
            None => (0, BTreeSet::new()),
        };

        let available_pool_size = total_pool_size.saturating_sub(excluded_count).max(1);
        probability /= available_pool_size as f64;
        used.insert(key.name.clone());

        breakdown.push(GroupBreakdown {
            slot,
            group_id,
            skill: key.clone(),
            total_pool_size,
            available_pool_size,
            excluded_base_names,
        });
    }

    breakdown.sort_by_key(|b| b.slot);

    Score {
        probability,
        breakdown,
        warnings,
    }
}
