//! Equipment slot patterns and their per-rarity probabilities
//!
//! A slot pattern is the decoration-socket layout rolled alongside the
//! skills: up to three tokens, each a socket size (`0`-`3`) or the
//! wildcard `W`. Patterns are canonicalized as tokens joined by `-`
//! (`W-2-1`), and table keys are parsed into [`SlotPattern`] at load time.

use crate::skill::ParseError;
use crate::tables::{GroupId, RarityEntry, Template};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Largest numeric socket size
pub const MAX_SLOT_SIZE: u8 = 3;

/// Maximum number of tokens in one pattern
pub const MAX_SLOTS: usize = 3;

/// One socket in a slot pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotToken {
    /// Socket of the given size (0 = no socket)
    Size(u8),
    /// Weapon-only socket
    Wildcard,
}

impl std::fmt::Display for SlotToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotToken::Size(size) => write!(f, "{}", size),
            SlotToken::Wildcard => write!(f, "W"),
        }
    }
}

impl SlotToken {
    fn parse(token: &str, pattern: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidSlotToken {
            pattern: pattern.to_string(),
            token: token.to_string(),
        };

        if token.eq_ignore_ascii_case("w") || token == "*" {
            return Ok(SlotToken::Wildcard);
        }

        let size: u8 = token.parse().map_err(|_| invalid())?;
        if size > MAX_SLOT_SIZE {
            return Err(invalid());
        }
        Ok(SlotToken::Size(size))
    }
}

/// Ordered slot layout used as a probability-table key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotPattern {
    tokens: Vec<SlotToken>,
}

impl SlotPattern {
    pub fn new(tokens: Vec<SlotToken>) -> Result<Self, ParseError> {
        if tokens.is_empty() || tokens.len() > MAX_SLOTS {
            let shown = tokens
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("-");
            return Err(ParseError::SlotCount(shown));
        }
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[SlotToken] {
        &self.tokens
    }

    /// Canonical string key (`W-2-1`)
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for SlotPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, "-")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for SlotPattern {
    type Err = ParseError;

    /// Accepts `W-2-1`, `w,2,1`, `[W] [2] [1]`, `W 2 1`, or compact `W21`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s
            .chars()
            .map(|c| match c {
                '[' | ']' | ',' | '-' | '_' => ' ',
                c => c,
            })
            .collect();

        let parts: Vec<&str> = cleaned.split_whitespace().collect();
        let tokens: Vec<String> = if parts.len() == 1 && parts[0].chars().count() > 1 {
            parts[0].chars().map(String::from).collect()
        } else {
            parts.iter().map(|p| p.to_string()).collect()
        };

        let tokens = tokens
            .iter()
            .map(|t| SlotToken::parse(t, s))
            .collect::<Result<Vec<_>, _>>()?;

        if tokens.is_empty() || tokens.len() > MAX_SLOTS {
            return Err(ParseError::SlotCount(s.to_string()));
        }
        Ok(Self { tokens })
    }
}

impl Serialize for SlotPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key())
    }
}

impl<'de> Deserialize<'de> for SlotPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Combination-weighted mean of one pattern's probability over `templates`.
///
/// Templates without the pattern contribute 0. Returns `None` when no
/// template lists the pattern at all. When every weight is zero the plain
/// mean is used instead.
pub fn weighted_slot_probability<'a, I>(templates: I, pattern: &SlotPattern) -> Option<f64>
where
    I: IntoIterator<Item = &'a Template>,
{
    let mut seen = false;
    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    let mut plain = 0.0;
    let mut count = 0usize;

    for template in templates {
        let p = match template.slot_probabilities.get(pattern) {
            Some(&p) => {
                seen = true;
                p
            }
            None => 0.0,
        };
        let weight = template.combination_weight as f64;
        weighted += weight * p;
        total_weight += weight;
        plain += p;
        count += 1;
    }

    if !seen || count == 0 {
        return None;
    }

    if total_weight > 0.0 {
        Some(weighted / total_weight)
    } else {
        Some(plain / count as f64)
    }
}

/// Slot probability for a charm with the given group list.
///
/// Uses the rarity's templates whose group list equals `groups`; falls back
/// to the rarity-level rollup over every template when none match.
pub fn charm_slot_probability(
    rarity: &RarityEntry,
    groups: &[GroupId],
    pattern: &SlotPattern,
) -> Option<f64> {
    let matching: Vec<&Template> = rarity
        .templates
        .iter()
        .filter(|t| t.skill_groups == groups)
        .collect();

    if matching.is_empty() {
        return rarity_slot_probability(rarity, pattern);
    }

    weighted_slot_probability(matching, pattern)
        .or_else(|| rarity_slot_probability(rarity, pattern).map(|_| 0.0))
}

/// Rarity-level probability of a slot pattern
pub fn rarity_slot_probability(rarity: &RarityEntry, pattern: &SlotPattern) -> Option<f64> {
    weighted_slot_probability(&rarity.templates, pattern)
}

/// Rarity-level probability of every slot pattern the rarity lists
pub fn rarity_slot_distribution(rarity: &RarityEntry) -> BTreeMap<SlotPattern, f64> {
    let mut patterns: Vec<&SlotPattern> = rarity
        .templates
        .iter()
        .flat_map(|t| t.slot_probabilities.keys())
        .collect();
    patterns.sort();
    patterns.dedup();

    patterns
        .into_iter()
        .filter_map(|p| rarity_slot_probability(rarity, p).map(|prob| (p.clone(), prob)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::fixture::TablesBuilder;

    fn pattern(s: &str) -> SlotPattern {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_canonical_forms() {
        assert_eq!(pattern("W-2-1").key(), "W-2-1");
        assert_eq!(pattern("w,2,1").key(), "W-2-1");
        assert_eq!(pattern("[W] [2] [1]").key(), "W-2-1");
        assert_eq!(pattern("W21").key(), "W-2-1");
        assert_eq!(pattern("3 1 0").key(), "3-1-0");
        assert_eq!(pattern("*-1").key(), "W-1");
        assert_eq!(pattern("2").key(), "2");
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert!(matches!(
            "W-4-1".parse::<SlotPattern>(),
            Err(ParseError::InvalidSlotToken { .. })
        ));
        assert!(matches!(
            "1-1-1-1".parse::<SlotPattern>(),
            Err(ParseError::SlotCount(_))
        ));
        assert!(matches!(
            "".parse::<SlotPattern>(),
            Err(ParseError::SlotCount(_))
        ));
        assert!(SlotPattern::new(Vec::new()).is_err());
    }

    #[test]
    fn test_serde_uses_canonical_key() {
        let p = pattern("w 1 0");
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"W-1-0\"");
        let back: SlotPattern = serde_json::from_str("\"W10\"").unwrap();
        assert_eq!(back, p);
    }

    fn slot_tables() -> crate::CharmTables {
        TablesBuilder::new()
            .group(1, &[("A", 1), ("B", 1)])
            .group(2, &[("C", 1), ("D", 1)])
            .rarity("R", 1.0)
            .template("R", &[1], 1, &[("W-1-0", 0.5), ("W-0-0", 0.5)])
            .template("R", &[2], 3, &[("W-1-0", 0.1), ("W-2-1", 0.9)])
            .build()
    }

    #[test]
    fn test_rarity_rollup_is_weighted() {
        let tables = slot_tables();
        let rarity = tables.rarity("R").unwrap();

        // (1 * 0.5 + 3 * 0.1) / 4
        let p = rarity_slot_probability(rarity, &pattern("W-1-0")).unwrap();
        assert!((p - 0.2).abs() < 1e-12);

        // Template 1 lacks the key and counts as 0: (3 * 0.9) / 4
        let p = rarity_slot_probability(rarity, &pattern("W-2-1")).unwrap();
        assert!((p - 0.675).abs() < 1e-12);

        assert_eq!(rarity_slot_probability(rarity, &pattern("3-3-3")), None);
    }

    #[test]
    fn test_charm_lookup_prefers_matching_templates() {
        let tables = slot_tables();
        let rarity = tables.rarity("R").unwrap();

        let p = charm_slot_probability(rarity, &[2], &pattern("W-2-1")).unwrap();
        assert!((p - 0.9).abs() < 1e-12);

        // Known to the rarity but not to this template
        let p = charm_slot_probability(rarity, &[1], &pattern("W-2-1")).unwrap();
        assert_eq!(p, 0.0);

        // Unknown group list falls back to the rarity rollup
        let p = charm_slot_probability(rarity, &[1, 2], &pattern("W-1-0")).unwrap();
        assert!((p - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_zero_weights_use_plain_mean() {
        let tables = TablesBuilder::new()
            .group(1, &[("A", 1)])
            .rarity("R", 1.0)
            .template("R", &[1], 0, &[("1", 0.2)])
            .template("R", &[1], 0, &[("1", 0.4)])
            .build();
        let rarity = tables.rarity("R").unwrap();
        let p = rarity_slot_probability(rarity, &pattern("1")).unwrap();
        assert!((p - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_distribution_lists_every_pattern() {
        let tables = slot_tables();
        let dist = rarity_slot_distribution(tables.rarity("R").unwrap());
        let keys: Vec<String> = dist.keys().map(SlotPattern::key).collect();
        assert_eq!(keys.len(), 3);
        let total: f64 = dist.values().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }
}
