//! Matching selected skills to a charm's group slots
//!
//! Two separate searches live here. [`find_assignments`] enumerates every
//! selection tuple and places it first-fit; its output feeds probability
//! summation. [`best_assignment`] explores every placement and keeps the
//! one covering the most skills; it only feeds display.

use crate::skill::SkillKey;
use crate::tables::{CharmTables, GroupId};
use std::collections::HashSet;

/// Skill placed in each template slot, aligned with the charm's groups
pub type Assignment = Vec<Option<SkillKey>>;

/// One assignment per feasible selection tuple.
///
/// Each slot of `candidates` is an OR-set; an empty slot contributes a
/// single "nothing chosen" option. Tuples that repeat a base name, or that
/// leave a chosen skill without a slot, are dropped. Duplicate assignments
/// from different tuples are kept.
pub fn find_assignments(
    tables: &CharmTables,
    group_slots: &[GroupId],
    candidates: &[Vec<SkillKey>],
) -> Vec<Assignment> {
    let choices = slot_choices(candidates);
    let mut assignments = Vec::new();
    let mut tuples = 0usize;

    for_each_tuple(&choices, &mut Vec::with_capacity(choices.len()), &mut |tuple| {
        tuples += 1;
        if let Some(assignment) = place_first_fit(tables, group_slots, tuple) {
            assignments.push(assignment);
        }
    });

    tracing::debug!(
        "{} of {} selection tuples fit groups {:?}",
        assignments.len(),
        tuples,
        group_slots
    );
    assignments
}

/// The placement covering the most selected skills, for display.
///
/// Tries every tuple and every injective slot placement, allowing a skill
/// to stay unplaced. Ties keep the first placement found (tuple order, then
/// template slot order). Returns all-`None` when nothing can be placed.
pub fn best_assignment(
    tables: &CharmTables,
    group_slots: &[GroupId],
    candidates: &[Vec<SkillKey>],
) -> Assignment {
    let choices = slot_choices(candidates);
    let mut best: Option<(usize, Assignment)> = None;

    for_each_tuple(&choices, &mut Vec::with_capacity(choices.len()), &mut |tuple| {
        let mut current = vec![None; group_slots.len()];
        search_coverage(tables, group_slots, tuple, 0, &mut current, 0, &mut best);
    });

    best.map(|(_, assignment)| assignment)
        .unwrap_or_else(|| vec![None; group_slots.len()])
}

/// Remove repeated assignments, keeping first occurrences
pub fn dedup_assignments(assignments: &[Assignment]) -> Vec<Assignment> {
    let mut seen: HashSet<&Assignment> = HashSet::new();
    assignments
        .iter()
        .filter(|a| seen.insert(*a))
        .cloned()
        .collect()
}

/// Number of slots holding a skill
pub fn placed_count(assignment: &Assignment) -> usize {
    assignment.iter().filter(|s| s.is_some()).count()
}

fn slot_choices(candidates: &[Vec<SkillKey>]) -> Vec<Vec<Option<&SkillKey>>> {
    candidates
        .iter()
        .map(|slot| {
            if slot.is_empty() {
                return vec![None];
            }
            let mut unique: Vec<Option<&SkillKey>> = Vec::with_capacity(slot.len());
            for key in slot {
                if !unique.contains(&Some(key)) {
                    unique.push(Some(key));
                }
            }
            unique
        })
        .collect()
}

fn for_each_tuple<'a>(
    choices: &[Vec<Option<&'a SkillKey>>],
    tuple: &mut Vec<Option<&'a SkillKey>>,
    visit: &mut dyn FnMut(&[Option<&'a SkillKey>]),
) {
    let Some((first, rest)) = choices.split_first() else {
        visit(tuple);
        return;
    };
    for &choice in first {
        tuple.push(choice);
        for_each_tuple(rest, tuple, visit);
        tuple.pop();
    }
}

fn repeats_base_name(tuple: &[Option<&SkillKey>]) -> bool {
    let keys: Vec<&SkillKey> = tuple.iter().flatten().copied().collect();
    keys.iter()
        .enumerate()
        .any(|(i, a)| keys[i + 1..].iter().any(|b| a.shares_base(b)))
}

fn place_first_fit(
    tables: &CharmTables,
    group_slots: &[GroupId],
    tuple: &[Option<&SkillKey>],
) -> Option<Assignment> {
    if repeats_base_name(tuple) {
        return None;
    }

    let mut assignment: Assignment = vec![None; group_slots.len()];
    for key in tuple.iter().flatten() {
        let groups = tables.groups_for_skill(key);
        let slot = (0..group_slots.len())
            .find(|&i| assignment[i].is_none() && groups.contains(&group_slots[i]))?;
        assignment[slot] = Some((*key).clone());
    }
    Some(assignment)
}

fn search_coverage(
    tables: &CharmTables,
    group_slots: &[GroupId],
    tuple: &[Option<&SkillKey>],
    index: usize,
    current: &mut Assignment,
    placed: usize,
    best: &mut Option<(usize, Assignment)>,
) {
    if index == tuple.len() {
        if best.as_ref().map_or(true, |(count, _)| placed > *count) {
            *best = Some((placed, current.clone()));
        }
        return;
    }

    if let Some(key) = tuple[index] {
        let clashes = current.iter().flatten().any(|k| k.shares_base(key));
        if !clashes {
            let groups = tables.groups_for_skill(key);
            for slot in 0..group_slots.len() {
                if current[slot].is_none() && groups.contains(&group_slots[slot]) {
                    current[slot] = Some(key.clone());
                    search_coverage(tables, group_slots, tuple, index + 1, current, placed + 1, best);
                    current[slot] = None;
                }
            }
        }
    }

    search_coverage(tables, group_slots, tuple, index + 1, current, placed, best);
}
