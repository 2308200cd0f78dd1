//! Combat round arithmetic.
//!
//! Each round both sides roll 2d6 and add their Skill; the player also adds
//! the selected weapon's mastery bonus. Higher attack strength wounds the
//! other side for 2 Stamina. A luck test after a decisive round changes that
//! damage by the amounts in [`luck_effect`].

use std::fmt;

use crate::dice::{D6, DieSource, Roll};

/// Stamina lost by the side that loses a round.
pub const ROUND_DAMAGE: i32 = 2;

/// Who won a combat round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    /// The player's attack strength was higher.
    Player,
    /// The enemy's attack strength was higher.
    Enemy,
    /// Equal attack strength; nobody is hurt.
    Draw,
}

impl RoundOutcome {
    /// Whether somebody was wounded.
    pub fn is_decisive(self) -> bool {
        self != Self::Draw
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "you wound the enemy"),
            Self::Enemy => write!(f, "the enemy wounds you"),
            Self::Draw => write!(f, "the blows cancel out"),
        }
    }
}

/// The dice and totals of one resolved round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    /// Player's 2d6.
    pub player_roll: Roll,
    /// Enemy's 2d6.
    pub enemy_roll: Roll,
    /// Player attack strength: dice + Skill + weapon bonus.
    pub player_total: i32,
    /// Enemy attack strength: dice + Skill.
    pub enemy_total: i32,
    /// Round winner.
    pub outcome: RoundOutcome,
}

/// Roll a round: player dice first, then enemy dice.
pub fn resolve_round(
    die: &mut impl DieSource,
    player_skill: i32,
    weapon_bonus: i32,
    enemy_skill: i32,
) -> RoundReport {
    let player_roll = die.roll_many(2, D6);
    let enemy_roll = die.roll_many(2, D6);
    let player_total = player_roll
        .signed_total()
        .saturating_add(player_skill)
        .saturating_add(weapon_bonus);
    let enemy_total = enemy_roll.signed_total().saturating_add(enemy_skill);
    let outcome = match player_total.cmp(&enemy_total) {
        std::cmp::Ordering::Greater => RoundOutcome::Player,
        std::cmp::Ordering::Less => RoundOutcome::Enemy,
        std::cmp::Ordering::Equal => RoundOutcome::Draw,
    };
    tracing::debug!(player_total, enemy_total, ?outcome, "round resolved");
    RoundReport {
        player_roll,
        enemy_roll,
        player_total,
        enemy_total,
        outcome,
    }
}

/// Stamina corrections from a luck test taken after a round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LuckEffect {
    /// Change to the enemy's Stamina.
    pub enemy_stamina: i32,
    /// Change to the player's Stamina.
    pub player_stamina: i32,
}

/// What a luck test does after a round with the given outcome.
///
/// | outcome | lucky             | unlucky           |
/// |---------|-------------------|-------------------|
/// | Player  | enemy loses 2     | enemy regains 1   |
/// | Enemy   | player regains 1  | player loses 1    |
///
/// A draw offers no luck test.
pub fn luck_effect(outcome: RoundOutcome, success: bool) -> Option<LuckEffect> {
    let effect = match (outcome, success) {
        (RoundOutcome::Draw, _) => return None,
        (RoundOutcome::Player, true) => LuckEffect {
            enemy_stamina: -2,
            player_stamina: 0,
        },
        (RoundOutcome::Player, false) => LuckEffect {
            enemy_stamina: 1,
            player_stamina: 0,
        },
        (RoundOutcome::Enemy, true) => LuckEffect {
            enemy_stamina: 0,
            player_stamina: 1,
        },
        (RoundOutcome::Enemy, false) => LuckEffect {
            enemy_stamina: 0,
            player_stamina: -1,
        },
    };
    Some(effect)
}
