//! Core CLI definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::selection::SelectionArgs;
use charmcalc::GroupId;

#[derive(Parser)]
#[command(name = "charmcalc")]
#[command(about = "Charm drop probability calculator", long_about = None)]
pub struct Cli {
    /// Tables JSON (uses the configured path, then the bundled sample)
    #[arg(long, global = true, env = "CHARMCALC_TABLES")]
    pub tables: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probability that one charm shape carries the selected skills
    #[command(visible_alias = "p")]
    Prob {
        /// Charm rarity (e.g. "RARE[7]"; uses configured default if not provided)
        #[arg(short, long)]
        rarity: Option<String>,

        /// Skill group of each charm slot, in order (e.g. 3,6,5)
        #[arg(short, long, value_delimiter = ',', required = true)]
        groups: Vec<GroupId>,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Rank every charm shape able to carry the selected skills
    #[command(visible_alias = "s")]
    Search {
        /// Only search this rarity
        #[arg(short, long)]
        rarity: Option<String>,

        /// Show at most this many charms
        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// List skill groups, one group's skills, or the groups holding a skill
    #[command(visible_alias = "g")]
    Groups {
        /// Show the skills of this group
        #[arg(long, conflicts_with = "find")]
        id: Option<GroupId>,

        /// Find skills by name and list the groups containing them
        #[arg(short, long)]
        find: Option<String>,
    },

    /// List rarities with their templates
    #[command(visible_alias = "r")]
    Rarities {
        /// Include each rarity's slot pattern distribution
        #[arg(long)]
        slots: bool,
    },

    /// Check table integrity (probability sums, combination counts)
    Check,

    /// Format a probability as a display fraction
    #[command(visible_alias = "f")]
    Fraction {
        /// Probability to format
        value: f64,

        /// Largest denominator considered
        #[arg(long, default_value_t = charmcalc::fraction::DEFAULT_MAX_DENOMINATOR)]
        max_denominator: u64,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set default tables JSON path
        #[arg(long = "set-tables")]
        tables: Option<PathBuf>,

        /// Set default rarity for `prob`
        #[arg(long)]
        rarity: Option<String>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use charmcalc::{SkillKey, SlotPattern};
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_prob() {
        let cli = Cli::try_parse_from([
            "charmcalc",
            "prob",
            "--rarity",
            "RARE[7]",
            "--groups",
            "3,6,5",
            "-1",
            "Adaptability Lv.1,Adaptability Lv.2",
            "--slot2",
            "Ambush Lv.2",
            "--pattern",
            "W-2-1",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        let Commands::Prob {
            rarity,
            groups,
            selection,
        } = cli.command
        else {
            panic!("expected prob");
        };
        assert_eq!(rarity.as_deref(), Some("RARE[7]"));
        assert_eq!(groups, vec![3, 6, 5]);
        assert_eq!(
            selection.slot1,
            vec![SkillKey::new("Adaptability", 1), SkillKey::new("Adaptability", 2)]
        );
        assert_eq!(selection.slot2, vec![SkillKey::new("Ambush", 2)]);
        assert!(selection.slot3.is_empty());

        let state = selection.to_selection();
        assert_eq!(state.constrained_slots(), 2);
        assert_eq!(state.slot_pattern, Some("W-2-1".parse::<SlotPattern>().unwrap()));
    }

    #[test]
    fn test_parse_rejects_bad_skill() {
        let result = Cli::try_parse_from(["charmcalc", "prob", "-g", "3", "-1", "Adaptability"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_fraction_default_bound() {
        let cli = Cli::try_parse_from(["charmcalc", "fraction", "0.25"]).unwrap();
        let Commands::Fraction {
            value,
            max_denominator,
        } = cli.command
        else {
            panic!("expected fraction");
        };
        assert_eq!(value, 0.25);
        assert_eq!(max_denominator, 100_000_000);
    }
}
