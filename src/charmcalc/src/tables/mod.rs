//! Static domain tables: rarities, templates, and skill groups
//!
//! Tables are loaded once from JSON, validated, and kept immutable for the
//! rest of the process. A reverse index maps every [`SkillKey`] to the
//! groups that contain it.

mod integrity;
mod types;

#[cfg(test)]
pub(crate) mod fixture;

pub use integrity::{count_combinations, Integrity};
pub use types::{
    GroupId, RarityEntry, RawRarity, RawSkill, RawSkillGroup, RawTemplate, SkillEntry,
    SkillGroup, TablesDocument, Template,
};

use crate::skill::{ParseError, SkillKey};
use crate::slots::{SlotPattern, MAX_SLOTS};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Sample tables bundled with the library
const SAMPLE_TABLES_JSON: &str = include_str!("../../../../share/tables/sample.json");

static SAMPLE_TABLES: Lazy<std::result::Result<CharmTables, String>> =
    Lazy::new(|| CharmTables::from_json(SAMPLE_TABLES_JSON).map_err(|e| e.to_string()));

/// Errors from loading or validating tables
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid tables JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate rarity id: {0}")]
    DuplicateRarity(String),

    #[error("Duplicate skill group id: {0}")]
    DuplicateGroup(GroupId),

    #[error("Skill group {group} lists {name} Lv.{level} more than once")]
    DuplicateSkill {
        group: GroupId,
        name: String,
        level: u32,
    },

    #[error("Skill group {group}: {name} has level 0")]
    ZeroLevel { group: GroupId, name: String },

    #[error("{rarity} template {template} references unknown skill group {group}")]
    UnknownGroup {
        rarity: String,
        template: usize,
        group: GroupId,
    },

    #[error("{rarity} template {template} has {count} skill groups (expected 1-3)")]
    GroupCount {
        rarity: String,
        template: usize,
        count: usize,
    },

    #[error("Probability out of range for {context}: {value}")]
    ProbabilityOutOfRange { context: String, value: f64 },

    #[error("{rarity} template {template}: {error}")]
    SlotPattern {
        rarity: String,
        template: usize,
        error: ParseError,
    },

    #[error("Bundled sample tables failed to load: {0}")]
    Sample(String),
}

pub type Result<T> = std::result::Result<T, TableError>;

/// Immutable, validated snapshot of the rarity and skill-group tables
#[derive(Debug, Clone)]
pub struct CharmTables {
    rarities: Vec<RarityEntry>,
    rarity_index: HashMap<String, usize>,
    groups: Vec<SkillGroup>,
    group_index: HashMap<GroupId, usize>,
    /// Index: skill key → groups containing it (in table order)
    skill_index: HashMap<SkillKey, Vec<GroupId>>,
}

impl CharmTables {
    /// Load tables from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let tables = Self::from_json(&content)?;
        tracing::info!(
            "Loaded {} rarities and {} skill groups from {}",
            tables.rarities.len(),
            tables.groups.len(),
            path.as_ref().display()
        );
        Ok(tables)
    }

    /// Parse and validate a JSON tables document
    pub fn from_json(json: &str) -> Result<Self> {
        let document: TablesDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// The sample tables compiled into the library
    pub fn sample() -> Result<&'static CharmTables> {
        SAMPLE_TABLES
            .as_ref()
            .map_err(|e| TableError::Sample(e.clone()))
    }

    /// Validate a document and build the typed snapshot
    pub fn from_document(document: TablesDocument) -> Result<Self> {
        let mut groups = Vec::with_capacity(document.skill_groups.len());
        let mut group_index = HashMap::new();
        let mut skill_index: HashMap<SkillKey, Vec<GroupId>> = HashMap::new();

        for raw in document.skill_groups {
            if group_index.contains_key(&raw.id) {
                return Err(TableError::DuplicateGroup(raw.id));
            }
            let group = build_group(raw)?;
            for skill in &group.skills {
                skill_index.entry(skill.key()).or_default().push(group.id);
            }
            group_index.insert(group.id, groups.len());
            groups.push(group);
        }

        let mut rarities = Vec::with_capacity(document.rarities.len());
        let mut rarity_index = HashMap::new();

        for raw in document.rarities {
            if rarity_index.contains_key(&raw.id) {
                return Err(TableError::DuplicateRarity(raw.id));
            }
            let rarity = build_rarity(raw, &group_index)?;
            rarity_index.insert(rarity.id.clone(), rarities.len());
            rarities.push(rarity);
        }

        Ok(Self {
            rarities,
            rarity_index,
            groups,
            group_index,
            skill_index,
        })
    }

    pub fn rarities(&self) -> &[RarityEntry] {
        &self.rarities
    }

    pub fn rarity(&self, id: &str) -> Option<&RarityEntry> {
        self.rarity_index.get(id).map(|&i| &self.rarities[i])
    }

    pub fn groups(&self) -> &[SkillGroup] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&SkillGroup> {
        self.group_index.get(&id).map(|&i| &self.groups[i])
    }

    /// Groups whose pool contains `key` (empty if none)
    pub fn groups_for_skill(&self, key: &SkillKey) -> &[GroupId] {
        self.skill_index
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every distinct skill key, sorted
    pub fn skill_keys(&self) -> Vec<&SkillKey> {
        let mut keys: Vec<&SkillKey> = self.skill_index.keys().collect();
        keys.sort();
        keys
    }

    /// Find skill keys by name (case-insensitive, exact name first, then partial)
    pub fn find_skills(&self, query: &str) -> Vec<&SkillKey> {
        let query_lower = query.trim().to_lowercase();
        let keys = self.skill_keys();

        let exact: Vec<&SkillKey> = keys
            .iter()
            .copied()
            .filter(|k| k.name.to_lowercase() == query_lower)
            .collect();
        if !exact.is_empty() {
            return exact;
        }

        keys.into_iter()
            .filter(|k| k.name.to_lowercase().contains(&query_lower))
            .collect()
    }

    /// Data-integrity findings that do not prevent loading
    pub fn integrity_report(&self) -> Vec<Integrity> {
        integrity::check(self)
    }
}

fn build_group(raw: RawSkillGroup) -> Result<SkillGroup> {
    let mut seen: HashSet<(String, u32)> = HashSet::new();
    let mut skills = Vec::with_capacity(raw.skills.len());

    for skill in raw.skills {
        if skill.level == 0 {
            return Err(TableError::ZeroLevel {
                group: raw.id,
                name: skill.name,
            });
        }
        if !seen.insert((skill.name.clone(), skill.level)) {
            return Err(TableError::DuplicateSkill {
                group: raw.id,
                name: skill.name,
                level: skill.level,
            });
        }
        let max_level = skill.max_level.unwrap_or(skill.level).max(skill.level);
        skills.push(SkillEntry {
            name: skill.name,
            level: skill.level,
            max_level,
        });
    }

    Ok(SkillGroup {
        id: raw.id,
        color: raw.color,
        skills,
    })
}

fn build_rarity(raw: RawRarity, group_index: &HashMap<GroupId, usize>) -> Result<RarityEntry> {
    check_probability(raw.probability, || format!("rarity {}", raw.id))?;

    let mut templates = Vec::with_capacity(raw.templates.len());
    for (index, template) in raw.templates.into_iter().enumerate() {
        templates.push(build_template(&raw.id, index, template, group_index)?);
    }

    Ok(RarityEntry {
        id: raw.id,
        base_probability: raw.probability,
        templates,
    })
}

fn build_template(
    rarity: &str,
    index: usize,
    raw: RawTemplate,
    group_index: &HashMap<GroupId, usize>,
) -> Result<Template> {
    let skill_groups: Vec<GroupId> = raw.skill_groups.into_iter().flatten().collect();

    if skill_groups.is_empty() || skill_groups.len() > MAX_SLOTS {
        return Err(TableError::GroupCount {
            rarity: rarity.to_string(),
            template: index,
            count: skill_groups.len(),
        });
    }

    if let Some(&group) = skill_groups.iter().find(|g| !group_index.contains_key(g)) {
        return Err(TableError::UnknownGroup {
            rarity: rarity.to_string(),
            template: index,
            group,
        });
    }

    let mut slot_probabilities = HashMap::with_capacity(raw.slot_probabilities.len());
    for (key, probability) in raw.slot_probabilities {
        check_probability(probability, || {
            format!("{} template {} slot pattern {}", rarity, index, key)
        })?;
        let pattern: SlotPattern = key.parse().map_err(|error| TableError::SlotPattern {
            rarity: rarity.to_string(),
            template: index,
            error,
        })?;
        *slot_probabilities.entry(pattern).or_insert(0.0) += probability;
    }

    Ok(Template {
        skill_groups,
        combination_weight: raw.combination_count,
        slot_probabilities,
    })
}

fn check_probability(value: f64, context: impl FnOnce() -> String) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TableError::ProbabilityOutOfRange {
            context: context(),
            value,
        })
    }
}
