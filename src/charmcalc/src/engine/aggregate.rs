//! Charm probability aggregation

use super::exclusion::{score_assignment, GroupBreakdown};
use super::matcher::{best_assignment, find_assignments, Assignment};
use super::{push_warning, DataWarning};
use crate::selection::{CharmDescriptor, SelectionState};
use crate::slots::charm_slot_probability;
use crate::tables::CharmTables;
use serde::Serialize;

/// Base probability used when a charm's rarity is not in the tables
pub const MISSING_RARITY_PROBABILITY: f64 = 0.01;

/// Full probability breakdown for one charm and selection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbabilityResult {
    pub base_probability: f64,
    pub template_probability: f64,
    /// Sum over feasible selection tuples of the exclusion-aware skill draw
    pub group_probability: f64,
    pub final_probability_excluding_slot: f64,
    pub final_probability_including_slot: f64,
    pub slot_probability: f64,
    /// Feasible selection tuples summed into `group_probability`
    pub assignment_count: usize,
    /// Display placement behind `per_group_breakdown`
    pub representative: Assignment,
    pub per_group_breakdown: Vec<GroupBreakdown>,
    pub warnings: Vec<DataWarning>,
}

impl ProbabilityResult {
    /// Whether this charm can produce the selection at all
    pub fn is_possible(&self) -> bool {
        self.final_probability_including_slot > 0.0
    }
}

/// Probability that one charm drop has this shape and carries the selection
pub fn compute_charm_probability(
    tables: &CharmTables,
    charm: &CharmDescriptor,
    selection: &SelectionState,
) -> ProbabilityResult {
    let mut warnings = Vec::new();
    let rarity = tables.rarity(&charm.rarity);

    let base_probability = match rarity {
        Some(entry) => entry.base_probability,
        None => {
            tracing::warn!(
                "Rarity {} not found, using base probability {}",
                charm.rarity,
                MISSING_RARITY_PROBABILITY
            );
            push_warning(
                &mut warnings,
                DataWarning::MissingRarity {
                    rarity: charm.rarity.clone(),
                },
            );
            MISSING_RARITY_PROBABILITY
        }
    };

    let template_probability = rarity.map_or(1.0, |entry| entry.template_probability());

    let (group_probability, assignment_count) = if selection.is_empty() {
        (1.0, 0)
    } else {
        let assignments = find_assignments(tables, &charm.groups, &selection.slots);
        let mut total = 0.0;
        for assignment in &assignments {
            let score = score_assignment(tables, assignment, &charm.groups, &charm.rarity);
            total += score.probability;
            for warning in score.warnings {
                push_warning(&mut warnings, warning);
            }
        }
        (total, assignments.len())
    };

    let final_probability_excluding_slot =
        base_probability * template_probability * group_probability;

    let slot_probability = match &selection.slot_pattern {
        None => 1.0,
        Some(pattern) => {
            match rarity.and_then(|entry| charm_slot_probability(entry, &charm.groups, pattern)) {
                Some(p) => p,
                None => {
                    tracing::warn!(
                        "Slot pattern {} not listed for {}, using slot probability 1",
                        pattern,
                        charm.rarity
                    );
                    push_warning(
                        &mut warnings,
                        DataWarning::MissingSlotPattern {
                            rarity: charm.rarity.clone(),
                            pattern: pattern.key(),
                        },
                    );
                    1.0
                }
            }
        }
    };

    let final_probability_including_slot = final_probability_excluding_slot * slot_probability;

    let representative = if selection.is_empty() {
        vec![None; charm.groups.len()]
    } else {
        best_assignment(tables, &charm.groups, &selection.slots)
    };
    let per_group_breakdown =
        score_assignment(tables, &representative, &charm.groups, &charm.rarity).breakdown;

    ProbabilityResult {
        base_probability,
        template_probability,
        group_probability,
        final_probability_excluding_slot,
        final_probability_including_slot,
        slot_probability,
        assignment_count,
        representative,
        per_group_breakdown,
        warnings,
    }
}
