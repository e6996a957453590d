//! Data-integrity checks that are reported rather than enforced

use super::{CharmTables, GroupId};
use serde::Serialize;
use std::collections::HashSet;

/// Tolerance when comparing probability sums against 1
const SUM_TOLERANCE: f64 = 1e-6;

/// A finding from [`CharmTables::integrity_report`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Integrity {
    /// Rarity base probabilities do not sum to 1
    RaritySum { total: f64 },
    /// A template's slot pattern probabilities do not sum to 1
    SlotSum {
        rarity: String,
        template: usize,
        total: f64,
    },
    /// Stored combination weight differs from the counted one
    CombinationWeight {
        rarity: String,
        template: usize,
        stored: u64,
        counted: u64,
    },
    /// A skill group no template references
    UnusedGroup { group: GroupId },
}

impl std::fmt::Display for Integrity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Integrity::RaritySum { total } => {
                write!(f, "rarity probabilities sum to {} (expected 1)", total)
            }
            Integrity::SlotSum {
                rarity,
                template,
                total,
            } => write!(
                f,
                "{} template {}: slot probabilities sum to {} (expected 1)",
                rarity, template, total
            ),
            Integrity::CombinationWeight {
                rarity,
                template,
                stored,
                counted,
            } => write!(
                f,
                "{} template {}: combination weight {} but {} distinct skill tuples",
                rarity, template, stored, counted
            ),
            Integrity::UnusedGroup { group } => {
                write!(f, "skill group {} is not used by any template", group)
            }
        }
    }
}

pub(super) fn check(tables: &CharmTables) -> Vec<Integrity> {
    let mut findings = Vec::new();

    let total: f64 = tables.rarities().iter().map(|r| r.base_probability).sum();
    if !tables.rarities().is_empty() && (total - 1.0).abs() > SUM_TOLERANCE {
        findings.push(Integrity::RaritySum { total });
    }

    let mut used_groups: HashSet<GroupId> = HashSet::new();

    for rarity in tables.rarities() {
        for (index, template) in rarity.templates.iter().enumerate() {
            used_groups.extend(template.skill_groups.iter().copied());

            if !template.slot_probabilities.is_empty() {
                let total: f64 = template.slot_probabilities.values().sum();
                if (total - 1.0).abs() > SUM_TOLERANCE {
                    findings.push(Integrity::SlotSum {
                        rarity: rarity.id.clone(),
                        template: index,
                        total,
                    });
                }
            }

            let counted = count_combinations(tables, &template.skill_groups);
            if counted != template.combination_weight {
                findings.push(Integrity::CombinationWeight {
                    rarity: rarity.id.clone(),
                    template: index,
                    stored: template.combination_weight,
                    counted,
                });
            }
        }
    }

    for group in tables.groups() {
        if !used_groups.contains(&group.id) {
            findings.push(Integrity::UnusedGroup { group: group.id });
        }
    }

    findings
}

/// Count the ordered skill tuples a template can realize: one skill per
/// slot from that slot's group, with no base name repeated.
pub fn count_combinations(tables: &CharmTables, groups: &[GroupId]) -> u64 {
    let mut used: Vec<&str> = Vec::with_capacity(groups.len());
    count_from(tables, groups, &mut used)
}

fn count_from<'a>(tables: &'a CharmTables, groups: &[GroupId], used: &mut Vec<&'a str>) -> u64 {
    let Some((&first, rest)) = groups.split_first() else {
        return 1;
    };
    let Some(group) = tables.group(first) else {
        return 0;
    };

    let mut total = 0;
    for skill in &group.skills {
        if used.contains(&skill.name.as_str()) {
            continue;
        }
        used.push(skill.name.as_str());
        total += count_from(tables, rest, used);
        used.pop();
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::fixture::TablesBuilder;

    #[test]
    fn test_count_combinations_excludes_shared_names() {
        let tables = TablesBuilder::new()
            .group(1, &[("A", 1), ("A", 2), ("B", 1)])
            .group(2, &[("A", 1), ("C", 1)])
            .build();

        assert_eq!(count_combinations(&tables, &[1]), 3);
        // A1-C, A2-C, B-A1, B-C
        assert_eq!(count_combinations(&tables, &[1, 2]), 4);
        // Same group twice: ordered pairs of distinct names
        assert_eq!(count_combinations(&tables, &[2, 2]), 2);
        assert_eq!(count_combinations(&tables, &[]), 1);
        assert_eq!(count_combinations(&tables, &[7]), 0);
    }

    #[test]
    fn test_report_flags_problems() {
        let tables = TablesBuilder::new()
            .group(1, &[("A", 1), ("B", 1)])
            .group(2, &[("C", 1)])
            .rarity("R1", 0.5)
            .template("R1", &[1], 5, &[("W-1-0", 0.5), ("W-0-0", 0.4)])
            .build();

        let report = tables.integrity_report();
        assert!(report.contains(&Integrity::RaritySum { total: 0.5 }));
        assert!(report.iter().any(|i| matches!(i, Integrity::SlotSum { template: 0, .. })));
        assert!(report.contains(&Integrity::CombinationWeight {
            rarity: "R1".to_string(),
            template: 0,
            stored: 5,
            counted: 2,
        }));
        assert!(report.contains(&Integrity::UnusedGroup { group: 2 }));
    }

    #[test]
    fn test_sample_is_consistent() {
        let tables = CharmTables::sample().unwrap();
        let report = tables.integrity_report();
        assert!(report.is_empty(), "unexpected findings: {:?}", report);
    }
}
