//! Single charm probability command handler

use super::{format_probability, print_json};
use crate::cli::SelectionArgs;
use crate::config::Config;
use anyhow::{bail, Result};
use charmcalc::slots::MAX_SLOTS;
use charmcalc::{
    compute_charm_probability, CharmDescriptor, CharmTables, GroupId, ProbabilityResult,
    SelectionState,
};
use std::fmt::Write;

/// Handle the prob command
pub fn handle(
    tables: &CharmTables,
    config: &Config,
    rarity: Option<String>,
    groups: Vec<GroupId>,
    selection: &SelectionArgs,
    json: bool,
) -> Result<()> {
    let Some(rarity) = rarity.or_else(|| config.default_rarity().map(String::from)) else {
        bail!("No rarity given. Pass --rarity or set one with `charmcalc configure --rarity`");
    };
    if groups.len() > MAX_SLOTS {
        bail!("A charm has at most {} skill slots, got {}", MAX_SLOTS, groups.len());
    }

    let charm = CharmDescriptor::new(rarity, groups);
    let selection = selection.to_selection();
    let result = compute_charm_probability(tables, &charm, &selection);

    if json {
        print_json(&result)
    } else {
        print!("{}", render(&charm, &selection, &result));
        Ok(())
    }
}

fn render(charm: &CharmDescriptor, selection: &SelectionState, result: &ProbabilityResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Charm: {}", charm);
    for (i, slot) in selection.slots.iter().enumerate() {
        if slot.is_empty() {
            continue;
        }
        let names: Vec<String> = slot.iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "Slot {}: {}", i + 1, names.join(" | "));
    }
    if let Some(pattern) = &selection.slot_pattern {
        let _ = writeln!(out, "Pattern: {}", pattern);
    }

    if !result.per_group_breakdown.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:<6} {:<6} {:<28} {:>6} {:>10}  Excluded",
            "Slot", "Group", "Skill", "Pool", "Available"
        );
        let _ = writeln!(out, "{}", "-".repeat(70));
        for row in &result.per_group_breakdown {
            let excluded = if row.excluded_base_names.is_empty() {
                "-".to_string()
            } else {
                row.excluded_base_names
                    .iter()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            let _ = writeln!(
                out,
                "{:<6} {:<6} {:<28} {:>6} {:>10}  {}",
                row.slot + 1,
                row.group_id,
                row.skill.to_string(),
                row.total_pool_size,
                row.available_pool_size,
                excluded
            );
        }
    }

    let _ = writeln!(out);
    let rows = [
        ("Base probability", result.base_probability),
        ("Template probability", result.template_probability),
        ("Group probability", result.group_probability),
        ("Final (any slots)", result.final_probability_excluding_slot),
        ("Slot probability", result.slot_probability),
        ("Final", result.final_probability_including_slot),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "{:<22} {}", label, format_probability(value));
    }

    if !result.is_possible() {
        let _ = writeln!(out, "\nThis charm cannot carry the selected skills.");
    }
    for warning in &result.warnings {
        let _ = writeln!(out, "Warning: {}", warning);
    }

    out
}
