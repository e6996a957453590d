//! Table type definitions
//!
//! `Raw*` types mirror the JSON document; the typed entries are what the
//! engine reads after validation.

use crate::skill::SkillKey;
use crate::slots::SlotPattern;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Skill group identifier
pub type GroupId = u32;

/// Tables document as stored on disk
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablesDocument {
    pub rarities: Vec<RawRarity>,
    pub skill_groups: Vec<RawSkillGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRarity {
    pub id: String,
    pub probability: f64,
    #[serde(default)]
    pub templates: Vec<RawTemplate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTemplate {
    /// Group per skill slot; `null` marks an unused slot
    pub skill_groups: Vec<Option<GroupId>>,
    #[serde(default)]
    pub combination_count: u64,
    #[serde(default)]
    pub slot_probabilities: HashMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSkillGroup {
    pub id: GroupId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub skills: Vec<RawSkill>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSkill {
    pub name: String,
    pub level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_level: Option<u32>,
}

/// One skill option in a group's pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    pub name: String,
    pub level: u32,
    pub max_level: u32,
}

impl SkillEntry {
    pub fn key(&self) -> SkillKey {
        SkillKey::new(self.name.clone(), self.level)
    }
}

/// A pool of skills one charm slot draws from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGroup {
    pub id: GroupId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub skills: Vec<SkillEntry>,
}

impl SkillGroup {
    /// Number of skills in the pool
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn contains(&self, key: &SkillKey) -> bool {
        self.skills
            .iter()
            .any(|s| s.name == key.name && s.level == key.level)
    }

    /// Entries whose base name is in `names`
    pub fn count_named(&self, names: &HashSet<String>) -> usize {
        self.skills
            .iter()
            .filter(|s| names.contains(s.name.as_str()))
            .count()
    }
}

/// A fixed assignment of skill groups to a charm's slots
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub skill_groups: Vec<GroupId>,
    /// Distinct concrete skill assignments this template can realize
    pub combination_weight: u64,
    pub slot_probabilities: HashMap<SlotPattern, f64>,
}

impl Template {
    pub fn slot_count(&self) -> usize {
        self.skill_groups.len()
    }
}

/// Drop entry for one charm rarity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RarityEntry {
    pub id: String,
    pub base_probability: f64,
    pub templates: Vec<Template>,
}

impl RarityEntry {
    /// Whether any template of this rarity draws from `group`
    pub fn references_group(&self, group: GroupId) -> bool {
        self.templates
            .iter()
            .any(|t| t.skill_groups.contains(&group))
    }

    /// Probability of each individual template being selected
    pub fn template_probability(&self) -> f64 {
        if self.templates.is_empty() {
            1.0
        } else {
            1.0 / self.templates.len() as f64
        }
    }
}
