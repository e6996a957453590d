//! Small hand-built tables for unit tests

use super::{CharmTables, GroupId, RawRarity, RawSkill, RawSkillGroup, RawTemplate, TablesDocument};

pub(crate) struct TablesBuilder {
    document: TablesDocument,
}

impl TablesBuilder {
    pub(crate) fn new() -> Self {
        Self {
            document: TablesDocument::default(),
        }
    }

    /// Add a group from `(name, level)` pairs
    pub(crate) fn group(mut self, id: GroupId, skills: &[(&str, u32)]) -> Self {
        self.document.skill_groups.push(RawSkillGroup {
            id,
            color: None,
            skills: skills
                .iter()
                .map(|&(name, level)| RawSkill {
                    name: name.to_string(),
                    level,
                    max_level: None,
                })
                .collect(),
        });
        self
    }

    /// Add a group of `count` single-level skills named `{prefix}{n}`
    pub(crate) fn numbered_group(mut self, id: GroupId, prefix: &str, count: usize) -> Self {
        self.document.skill_groups.push(RawSkillGroup {
            id,
            color: None,
            skills: (0..count)
                .map(|n| RawSkill {
                    name: format!("{}{}", prefix, n),
                    level: 1,
                    max_level: None,
                })
                .collect(),
        });
        self
    }

    pub(crate) fn rarity(mut self, id: &str, probability: f64) -> Self {
        self.document.rarities.push(RawRarity {
            id: id.to_string(),
            probability,
            templates: Vec::new(),
        });
        self
    }

    pub(crate) fn template(
        mut self,
        rarity: &str,
        groups: &[GroupId],
        weight: u64,
        slots: &[(&str, f64)],
    ) -> Self {
        let template = RawTemplate {
            skill_groups: groups.iter().copied().map(Some).collect(),
            combination_count: weight,
            slot_probabilities: slots
                .iter()
                .map(|&(key, p)| (key.to_string(), p))
                .collect(),
        };
        if let Some(entry) = self.document.rarities.iter_mut().find(|r| r.id == rarity) {
            entry.templates.push(template);
        }
        self
    }

    pub(crate) fn build(self) -> CharmTables {
        CharmTables::from_document(self.document).unwrap()
    }
}
