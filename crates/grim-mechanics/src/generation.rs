//! Rolling up a new character.

use grim_core::{CharacterState, StatPair};

use crate::dice::DieSource;

/// Added to one d6 for initial Skill.
pub const SKILL_BASE: i32 = 6;
/// Added to two d6 for initial Stamina.
pub const STAMINA_BASE: i32 = 12;
/// Added to one d6 for initial Luck.
pub const LUCK_BASE: i32 = 6;

/// Freshly rolled initial stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolledStats {
    /// Initial Skill, 7 to 12.
    pub skill: i32,
    /// Initial Stamina, 14 to 24.
    pub stamina: i32,
    /// Initial Luck, 7 to 12.
    pub luck: i32,
}

impl RolledStats {
    /// Write the stats into a character, setting both initial and current.
    pub fn apply(self, state: &mut CharacterState) {
        state.skill = StatPair::rolled(self.skill);
        state.stamina = StatPair::rolled(self.stamina);
        state.luck = StatPair::rolled(self.luck);
    }
}

/// Roll Skill (d6+6), Stamina (2d6+12), and Luck (d6+6), in that order.
pub fn roll_stats(die: &mut impl DieSource) -> RolledStats {
    let skill = d6(die) + SKILL_BASE;
    let stamina = d6(die) + d6(die) + STAMINA_BASE;
    let luck = d6(die) + LUCK_BASE;
    tracing::debug!(skill, stamina, luck, "rolled new character");
    RolledStats {
        skill,
        stamina,
        luck,
    }
}

fn d6(die: &mut impl DieSource) -> i32 {
    i32::try_from(die.d6()).unwrap_or(i32::MAX)
}
