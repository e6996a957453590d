//! Charm descriptors and skill selections passed into the engine

use crate::skill::SkillKey;
use crate::slots::SlotPattern;
use crate::tables::{GroupId, RarityEntry, Template};
use serde::{Deserialize, Serialize};

/// A concrete charm shape: rarity plus the ordered groups of its slots
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharmDescriptor {
    pub rarity: String,
    pub groups: Vec<GroupId>,
}

impl CharmDescriptor {
    pub fn new(rarity: impl Into<String>, groups: Vec<GroupId>) -> Self {
        Self {
            rarity: rarity.into(),
            groups,
        }
    }

    pub fn from_template(rarity: &RarityEntry, template: &Template) -> Self {
        Self::new(rarity.id.clone(), template.skill_groups.clone())
    }
}

impl std::fmt::Display for CharmDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let groups: Vec<String> = self.groups.iter().map(ToString::to_string).collect();
        write!(f, "{} [{}]", self.rarity, groups.join(", "))
    }
}

/// The skills a user asks for, one OR-set per slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    /// Candidate skills per slot; an empty slot is unconstrained
    pub slots: Vec<Vec<SkillKey>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_pattern: Option<SlotPattern>,
}

impl SelectionState {
    /// Build a selection, dropping repeated keys within each slot
    pub fn new(slots: Vec<Vec<SkillKey>>) -> Self {
        let slots = slots
            .into_iter()
            .map(|slot| {
                let mut unique: Vec<SkillKey> = Vec::with_capacity(slot.len());
                for key in slot {
                    if !unique.contains(&key) {
                        unique.push(key);
                    }
                }
                unique
            })
            .collect();
        Self {
            slots,
            slot_pattern: None,
        }
    }

    pub fn with_pattern(mut self, pattern: SlotPattern) -> Self {
        self.slot_pattern = Some(pattern);
        self
    }

    /// No skill chosen in any slot
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Vec::is_empty)
    }

    /// Number of slots holding at least one candidate
    pub fn constrained_slots(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_dedups_each_slot() {
        let guard = SkillKey::new("Guard", 1);
        let focus = SkillKey::new("Focus", 2);
        let selection = SelectionState::new(vec![
            vec![guard.clone(), focus.clone(), guard.clone()],
            vec![],
            vec![guard.clone()],
        ]);
        assert_eq!(selection.slots[0], vec![guard.clone(), focus]);
        assert_eq!(selection.slots[2], vec![guard]);
        assert_eq!(selection.constrained_slots(), 2);
        assert!(!selection.is_empty());
    }

    #[test]
    fn test_empty_selection() {
        assert!(SelectionState::new(vec![vec![], vec![], vec![]]).is_empty());
        assert!(SelectionState::default().is_empty());
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{
            "slots": [[{ "name": "Guard", "level": 2 }], []],
            "slotPattern": "W21"
        }"#;
        let selection: SelectionState = serde_json::from_str(json).unwrap();
        assert_eq!(selection.slots[0][0], SkillKey::new("Guard", 2));
        assert_eq!(selection.slot_pattern.map(|p| p.key()), Some("W-2-1".to_string()));
    }

    #[test]
    fn test_descriptor_display() {
        let charm = CharmDescriptor::new("RARE[7]", vec![3, 6, 5]);
        assert_eq!(charm.to_string(), "RARE[7] [3, 6, 5]");
    }
}
