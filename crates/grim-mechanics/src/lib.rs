//! Gamebook rules for Grimoire.
//!
//! Dice sources, rolling a new character, testing luck, and the
//! arithmetic of a single combat round. Nothing here persists state; the
//! store crate drives these functions against the active character.

pub mod combat;
pub mod dice;
pub mod error;
pub mod generation;
pub mod luck;

pub use combat::{LuckEffect, ROUND_DAMAGE, RoundOutcome, RoundReport, luck_effect, resolve_round};
pub use dice::{D6, DieSource, RandomDie, Roll, ScriptedDie};
pub use error::{MechError, MechResult};
pub use generation::{RolledStats, roll_stats};
pub use luck::{LuckTest, test_luck};
