//! Skill selection arguments shared by `prob` and `search`

use charmcalc::{SelectionState, SkillKey, SlotPattern};
use clap::Args;

#[derive(Args, Debug, Default)]
pub struct SelectionArgs {
    /// Skills wanted in the first slot, comma separated (any one of them)
    #[arg(short = '1', long = "slot1", value_delimiter = ',')]
    pub slot1: Vec<SkillKey>,

    /// Skills wanted in the second slot
    #[arg(short = '2', long = "slot2", value_delimiter = ',')]
    pub slot2: Vec<SkillKey>,

    /// Skills wanted in the third slot
    #[arg(short = '3', long = "slot3", value_delimiter = ',')]
    pub slot3: Vec<SkillKey>,

    /// Slot pattern filter (e.g. "W-2-1", "3-1-0")
    #[arg(short, long)]
    pub pattern: Option<SlotPattern>,
}

impl SelectionArgs {
    pub fn to_selection(&self) -> SelectionState {
        let slots = vec![self.slot1.clone(), self.slot2.clone(), self.slot3.clone()];
        let selection = SelectionState::new(slots);
        match &self.pattern {
            Some(pattern) => selection.with_pattern(pattern.clone()),
            None => selection,
        }
    }
}
