//! # charmcalc
//!
//! Charm drop probability engine.
//!
//! This library provides functionality to:
//! - Load and validate rarity and skill-group tables
//! - Match selected skills to a charm's group slots
//! - Score placements with base-name exclusion between slots
//! - Roll results up through rarity, template and slot pattern odds
//! - Render probabilities as display fractions
//!
//! ## Example
//!
//! ```
//! use charmcalc::{
//!     compute_charm_probability, decimal_to_fraction_default, CharmDescriptor, CharmTables,
//!     SelectionState,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tables = CharmTables::sample()?;
//! let charm = CharmDescriptor::new("RARE[7]", vec![3, 6, 5]);
//! let selection = SelectionState::new(vec![
//!     vec!["Adaptability Lv.1".parse()?],
//!     vec!["Ambush Lv.2".parse()?],
//!     vec!["Fire Attack Lv.3".parse()?],
//! ]);
//!
//! let result = compute_charm_probability(tables, &charm, &selection);
//! assert_eq!(decimal_to_fraction_default(result.group_probability), "1/53,280");
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod fraction;
pub mod selection;
pub mod skill;
pub mod slots;
pub mod tables;

#[cfg(feature = "wasm")]
pub mod wasm;

#[doc(inline)]
pub use engine::{
    compute_charm_probability, find_assignments, rank_charms, CharmRanking, DataWarning,
    GroupBreakdown, ProbabilityResult, RankedCharm,
};
#[doc(inline)]
pub use fraction::{decimal_to_fraction, decimal_to_fraction_default, Fraction};
#[doc(inline)]
pub use selection::{CharmDescriptor, SelectionState};
#[doc(inline)]
pub use skill::{ParseError, SkillKey};
#[doc(inline)]
pub use slots::{SlotPattern, SlotToken};
#[doc(inline)]
pub use tables::{CharmTables, GroupId, Integrity, TableError};

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> SkillKey {
        s.parse().unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * a.abs().max(b.abs())
    }

    #[test]
    fn test_rare7_three_slot_scenario() -> anyhow::Result<()> {
        let tables = CharmTables::sample()?;
        let charm = CharmDescriptor::new("RARE[7]", vec![3, 6, 5]);
        let selection = SelectionState::new(vec![
            vec![key("Adaptability Lv.1")],
            vec![key("Ambush Lv.2")],
            vec![key("Fire Attack Lv.3")],
        ]);

        let result = compute_charm_probability(tables, &charm, &selection);

        assert_eq!(result.base_probability, 0.03);
        assert_eq!(result.template_probability, 0.125);
        assert!(close(result.group_probability, 1.876876876876877e-5));
        assert!(close(result.group_probability, 1.0 / (40.0 * 36.0 * 37.0)));
        assert!(close(
            result.final_probability_excluding_slot,
            0.03 * 0.125 * result.group_probability
        ));
        assert!(result.warnings.is_empty());

        let pools: Vec<(GroupId, usize, usize)> = result
            .per_group_breakdown
            .iter()
            .map(|b| (b.group_id, b.total_pool_size, b.available_pool_size))
            .collect();
        assert_eq!(pools, vec![(3, 40, 40), (6, 37, 36), (5, 37, 37)]);
        assert!(result.per_group_breakdown[1]
            .excluded_base_names
            .contains("Adaptability"));
        Ok(())
    }

    #[test]
    fn test_rare7_slot_pattern() -> anyhow::Result<()> {
        let tables = CharmTables::sample()?;
        let charm = CharmDescriptor::new("RARE[7]", vec![3, 6, 5]);
        let selection = SelectionState::new(vec![vec![key("Adaptability Lv.1")]])
            .with_pattern("W-2-1".parse()?);

        let result = compute_charm_probability(tables, &charm, &selection);
        assert!(close(result.slot_probability, 0.1));
        assert!(close(
            result.final_probability_including_slot,
            result.final_probability_excluding_slot * 0.1
        ));
        Ok(())
    }

    #[test]
    fn test_two_slot_shared_name() -> anyhow::Result<()> {
        let tables = CharmTables::sample()?;
        let charm = CharmDescriptor::new("RARE[7]", vec![6, 5]);
        let selection = SelectionState::new(vec![
            vec![key("Sleep Resistance Lv.2")],
            vec![key("Fire Attack Lv.3")],
        ]);

        let result = compute_charm_probability(tables, &charm, &selection);
        assert!(close(result.group_probability, 1.0 / (37.0 * 36.0)));
        assert_eq!(decimal_to_fraction_default(result.group_probability), "1/1,332");
        Ok(())
    }

    #[test]
    fn test_sample_ranking_prefers_reachable_shapes() -> anyhow::Result<()> {
        let tables = CharmTables::sample()?;
        let selection = SelectionState::new(vec![vec![key("Fire Attack Lv.3")]]);
        let ranking = rank_charms(tables, &selection, None);

        assert!(!ranking.charms.is_empty());
        assert!(ranking
            .charms
            .iter()
            .all(|c| c.charm.rarity == "RARE[7]" && c.charm.groups.contains(&5)));
        let sum: f64 = ranking.charms.iter().map(|c| c.weighted_probability).sum();
        assert!(close(sum, ranking.total_probability));
        Ok(())
    }
}
