//! Table inspection command handlers (groups, rarities, check)

use super::print_json;
use anyhow::{bail, Result};
use charmcalc::slots::rarity_slot_distribution;
use charmcalc::{CharmTables, GroupId, SkillKey};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SkillLocation<'a> {
    skill: &'a SkillKey,
    groups: &'a [GroupId],
}

/// Handle the groups command
pub fn groups(
    tables: &CharmTables,
    id: Option<GroupId>,
    find: Option<&str>,
    json: bool,
) -> Result<()> {
    if let Some(id) = id {
        let Some(group) = tables.group(id) else {
            bail!("Unknown skill group {}", id);
        };
        if json {
            return print_json(group);
        }
        println!("Skill group {} ({} skills):\n", group.id, group.len());
        for skill in &group.skills {
            println!("  {:<28} max Lv.{}", skill.key().to_string(), skill.max_level);
        }
        return Ok(());
    }

    if let Some(query) = find {
        let locations: Vec<SkillLocation> = tables
            .find_skills(query)
            .into_iter()
            .map(|skill| SkillLocation {
                skill,
                groups: tables.groups_for_skill(skill),
            })
            .collect();

        if json {
            return print_json(&locations);
        }
        if locations.is_empty() {
            println!("No skills found for '{}'", query);
            println!("\nTry a partial name like 'attack' or 'resist'");
            return Ok(());
        }
        for location in &locations {
            let groups: Vec<String> = location.groups.iter().map(ToString::to_string).collect();
            println!(
                "{:<28} groups {}",
                location.skill.to_string(),
                groups.join(", ")
            );
        }
        return Ok(());
    }

    if json {
        return print_json(&tables.groups());
    }
    println!("{:<6} {:<10} {:>6}", "Group", "Color", "Skills");
    println!("{}", "-".repeat(24));
    for group in tables.groups() {
        println!(
            "{:<6} {:<10} {:>6}",
            group.id,
            group.color.as_deref().unwrap_or("-"),
            group.len()
        );
    }
    Ok(())
}

/// Handle the rarities command
pub fn rarities(tables: &CharmTables, slots: bool, json: bool) -> Result<()> {
    if json {
        return print_json(&tables.rarities());
    }

    for rarity in tables.rarities() {
        println!(
            "{} (probability {}, {} templates)",
            rarity.id,
            rarity.base_probability,
            rarity.templates.len()
        );
        for template in &rarity.templates {
            let groups: Vec<String> = template.skill_groups.iter().map(ToString::to_string).collect();
            println!(
                "  [{}] {} combinations",
                groups.join(", "),
                template.combination_weight
            );
        }
        if slots {
            println!("  Slot patterns:");
            for (pattern, p) in rarity_slot_distribution(rarity) {
                println!("    {:<8} {:.4}", pattern.to_string(), p);
            }
        }
        println!();
    }
    Ok(())
}

/// Handle the check command
pub fn check(tables: &CharmTables, json: bool) -> Result<()> {
    let report = tables.integrity_report();

    if json {
        return print_json(&report);
    }
    if report.is_empty() {
        println!("No integrity issues found");
        return Ok(());
    }

    println!("{} integrity issues:\n", report.len());
    for issue in &report {
        println!("  {}", issue);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_group_rejected() {
        let tables = CharmTables::sample().unwrap();
        assert!(groups(tables, Some(99), None, false).is_err());
        assert!(groups(tables, Some(3), None, false).is_ok());
    }

    #[test]
    fn test_sample_checks_clean() {
        let tables = CharmTables::sample().unwrap();
        assert!(tables.integrity_report().is_empty());
        assert!(check(tables, false).is_ok());
    }
}
