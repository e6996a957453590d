//! Skill keys and parse errors for user-facing input

use serde::{Deserialize, Serialize};

/// Errors from parsing skill keys and slot patterns
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid skill key '{0}': expected \"Name Lv.N\"")]
    InvalidSkillKey(String),

    #[error("Invalid skill level in '{0}': level must be at least 1")]
    InvalidLevel(String),

    #[error("Invalid slot token '{token}' in pattern '{pattern}'")]
    InvalidSlotToken { pattern: String, token: String },

    #[error("Slot pattern '{0}' must have between 1 and 3 slots")]
    SlotCount(String),
}

/// A skill at a specific level: the unit of selection and matching.
///
/// Two keys with the same name are mutually exclusive on one charm,
/// whatever their levels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SkillKey {
    pub name: String,
    pub level: u32,
}

impl SkillKey {
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }

    /// Base name shared by every level of this skill
    pub fn base_name(&self) -> &str {
        &self.name
    }

    /// Whether two keys are variants of the same base skill
    pub fn shares_base(&self, other: &SkillKey) -> bool {
        self.name == other.name
    }
}

impl std::fmt::Display for SkillKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Lv.{}", self.name, self.level)
    }
}

impl std::str::FromStr for SkillKey {
    type Err = ParseError;

    /// Parse `"Name Lv.N"`. The `Lv` marker is case-insensitive and the
    /// dot is optional (`"Guard lv3"` parses too).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        let marker = lower
            .rfind("lv")
            .ok_or_else(|| ParseError::InvalidSkillKey(s.to_string()))?;

        let name = trimmed[..marker].trim_end();
        let digits = trimmed[marker + 2..].trim_start_matches('.').trim();

        if name.is_empty() || digits.is_empty() {
            return Err(ParseError::InvalidSkillKey(s.to_string()));
        }

        let level: u32 = digits
            .parse()
            .map_err(|_| ParseError::InvalidSkillKey(s.to_string()))?;
        if level == 0 {
            return Err(ParseError::InvalidLevel(s.to_string()));
        }

        Ok(Self::new(name, level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_form() {
        let key: SkillKey = "Adaptability Lv.1".parse().unwrap();
        assert_eq!(key, SkillKey::new("Adaptability", 1));
        assert_eq!(key.to_string(), "Adaptability Lv.1");
    }

    #[test]
    fn test_parse_lenient_marker() {
        let key: SkillKey = "  Master's Touch lv3 ".parse().unwrap();
        assert_eq!(key, SkillKey::new("Master's Touch", 3));
    }

    #[test]
    fn test_parse_name_containing_lv() {
        // Only the last marker counts
        let key: SkillKey = "Evolve Lv.2".parse().unwrap();
        assert_eq!(key.name, "Evolve");
        assert_eq!(key.level, 2);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "Attack Boost".parse::<SkillKey>(),
            Err(ParseError::InvalidSkillKey(_))
        ));
        assert!(matches!(
            "Lv.2".parse::<SkillKey>(),
            Err(ParseError::InvalidSkillKey(_))
        ));
        assert!(matches!(
            "Guard Lv.0".parse::<SkillKey>(),
            Err(ParseError::InvalidLevel(_))
        ));
    }

    #[test]
    fn test_shares_base() {
        let a = SkillKey::new("Guard", 1);
        let b = SkillKey::new("Guard", 3);
        let c = SkillKey::new("Guard Up", 1);
        assert!(a.shares_base(&b));
        assert!(!a.shares_base(&c));
    }
}
