//! Testing your luck.
//!
//! Roll 2d6 against current Luck: at or under is lucky. Every test costs
//! one point of Luck whatever the outcome.

use grim_core::StatPair;

use crate::dice::{D6, DieSource, Roll};
use crate::error::{MechError, MechResult};

/// Outcome of a luck test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuckTest {
    /// Whether the roll was at or under Luck.
    pub success: bool,
    /// The 2d6 rolled.
    pub roll: Roll,
    /// Luck before the point was spent.
    pub current_luck: i32,
}

/// Test luck, spending one point.
///
/// With no luck left, fails without rolling and without touching `luck`.
pub fn test_luck(luck: &mut StatPair, die: &mut impl DieSource) -> MechResult<LuckTest> {
    if luck.is_depleted() {
        return Err(MechError::NoLuck);
    }
    let current_luck = luck.cur;
    let roll = die.roll_many(2, D6);
    let success = roll.signed_total() <= current_luck;
    luck.modify(-1);
    tracing::debug!(%roll, current_luck, success, "tested luck");
    Ok(LuckTest {
        success,
        roll,
        current_luck,
    })
}
