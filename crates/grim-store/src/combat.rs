//! A single fight against one enemy.
//!
//! [`CombatEngine`] is a short-lived session opened against the active
//! profile. It holds the enemy and the round state; the player's side lives
//! in the [`AdventureStore`] and is only touched through store actions. The
//! session is never saved: dropping it abandons the fight without a trace.
//!
//! ```text
//! Idle --assault--> Resolved(outcome) --assault--> Resolved(..) | Victory | Defeat
//!   \                   |
//!    +---flee-----------+----> Fled
//! ```

use std::fmt;

use grim_core::{CombatResult, EntryId, ProfileId, Stat};
use grim_mechanics::{
    DieSource, LuckEffect, LuckTest, ROUND_DAMAGE, RoundOutcome, RoundReport, luck_effect,
    resolve_round,
};

use crate::error::{StoreError, StoreResult};
use crate::storage::KeyValueStore;
use crate::store::AdventureStore;

/// The opponent in a fight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    /// Display name.
    pub name: String,
    /// Skill added to every attack roll.
    pub skill: i32,
    /// Remaining stamina; the enemy dies at zero.
    pub stamina: i32,
}

impl Enemy {
    /// An enemy with the given stats, floored at zero.
    pub fn new(name: impl Into<String>, skill: i32, stamina: i32) -> Self {
        Self {
            name: name.into(),
            skill: skill.max(0),
            stamina: stamina.max(0),
        }
    }
}

impl fmt::Display for Enemy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (skill {}, stamina {})",
            self.name, self.skill, self.stamina
        )
    }
}

/// Where a fight stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatPhase {
    /// Waiting for the first assault.
    Idle,
    /// A round was rolled; the next assault starts another.
    Resolved(RoundOutcome),
    /// The enemy died.
    Victory,
    /// The player died.
    Defeat,
    /// The player ran away.
    Fled,
}

impl CombatPhase {
    /// Whether the fight has ended.
    pub fn is_over(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat | Self::Fled)
    }
}

/// What an assault produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssaultOutcome {
    /// A round was rolled.
    Round(RoundReport),
    /// The enemy was already dead: the fight is logged as won.
    Victory {
        /// The new combat-log entry.
        record: EntryId,
        /// Mastery of the selected weapon after training, if one was used.
        weapon_val: Option<i32>,
    },
    /// The player was already dead: the fight is logged as lost.
    Defeat {
        /// The new combat-log entry.
        record: EntryId,
    },
}

/// A luck test taken during a fight and what it did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatLuck {
    /// The test itself.
    pub test: LuckTest,
    /// Stamina corrections that were applied.
    pub effect: LuckEffect,
}

/// Token returned by [`CombatEngine::request_flee`].
#[derive(Debug)]
#[must_use = "dropping a flee request keeps the fight going"]
pub struct FleeRequest {
    round: u32,
}

/// A fight in progress.
#[derive(Debug)]
pub struct CombatEngine<D> {
    profile: ProfileId,
    enemy: Enemy,
    die: D,
    phase: CombatPhase,
    weapon: Option<EntryId>,
    round: u32,
    luck_used: bool,
    last_round: Option<RoundReport>,
}

impl<D: DieSource> CombatEngine<D> {
    /// Open a fight against `enemy` for the active profile, wielding the
    /// first weapon in the pack if there is one.
    pub fn new<S: KeyValueStore, SD: DieSource>(
        store: &AdventureStore<S, SD>,
        enemy: Enemy,
        die: D,
    ) -> StoreResult<Self> {
        let profile = store.active_id().ok_or(StoreError::NotLoaded)?;
        let weapon = store.character().weapons.first().map(|w| w.id);
        tracing::info!(enemy = %enemy, "fight started");
        Ok(Self {
            profile,
            enemy,
            die,
            phase: CombatPhase::Idle,
            weapon,
            round: 0,
            luck_used: false,
            last_round: None,
        })
    }

    /// The opponent.
    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    /// Current phase.
    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    /// Whether the fight has ended.
    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    /// Rounds rolled so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// The weapon in hand.
    pub fn selected_weapon(&self) -> Option<EntryId> {
        self.weapon
    }

    /// The most recent round.
    pub fn last_round(&self) -> Option<&RoundReport> {
        self.last_round.as_ref()
    }

    /// Whether a luck test may be taken now.
    pub fn luck_available(&self) -> bool {
        matches!(self.phase, CombatPhase::Resolved(o) if o.is_decisive()) && !self.luck_used
    }

    fn ensure_live(&self) -> StoreResult<()> {
        if self.phase.is_over() {
            Err(StoreError::CombatOver)
        } else {
            Ok(())
        }
    }

    fn guard<S: KeyValueStore, SD: DieSource>(
        &self,
        store: &AdventureStore<S, SD>,
    ) -> StoreResult<()> {
        if store.active_id() == Some(self.profile) {
            Ok(())
        } else {
            Err(StoreError::ProfileChanged)
        }
    }

    /// Start the next round.
    ///
    /// A dead enemy or a dead player ends the fight here and records it in
    /// the combat log; otherwise both sides roll and the loser takes damage.
    /// If the save fails, the round or the ending still stands and the
    /// storage error is returned.
    pub fn assault<S: KeyValueStore, SD: DieSource>(
        &mut self,
        store: &mut AdventureStore<S, SD>,
    ) -> StoreResult<AssaultOutcome> {
        self.ensure_live()?;
        self.guard(store)?;
        if matches!(self.phase, CombatPhase::Resolved(_)) {
            self.phase = CombatPhase::Idle;
        }
        self.luck_used = false;

        if self.enemy.stamina <= 0 {
            return self.finish_victory(store);
        }
        if store.character().stamina.cur <= 0 {
            let record = store.record_combat(
                self.enemy.name.clone(),
                self.enemy.skill,
                self.enemy.stamina,
                CombatResult::Defeat,
            )?;
            self.phase = CombatPhase::Defeat;
            tracing::info!(enemy = %self.enemy.name, "fight lost");
            store.commit()?;
            return Ok(AssaultOutcome::Defeat { record });
        }

        let character = store.character();
        let bonus = self
            .weapon
            .and_then(|id| character.weapon(id))
            .map_or(0, |w| w.val);
        let report = resolve_round(&mut self.die, character.skill.cur, bonus, self.enemy.skill);
        self.round += 1;
        self.phase = CombatPhase::Resolved(report.outcome);
        self.last_round = Some(report.clone());
        match report.outcome {
            RoundOutcome::Player => {
                self.enemy.stamina = (self.enemy.stamina - ROUND_DAMAGE).max(0);
            }
            RoundOutcome::Enemy => {
                store.mod_stat(Stat::Stamina, -ROUND_DAMAGE)?;
            }
            RoundOutcome::Draw => {}
        }
        Ok(AssaultOutcome::Round(report))
    }

    fn finish_victory<S: KeyValueStore, SD: DieSource>(
        &mut self,
        store: &mut AdventureStore<S, SD>,
    ) -> StoreResult<AssaultOutcome> {
        let record = store.record_combat(
            self.enemy.name.clone(),
            self.enemy.skill,
            self.enemy.stamina,
            CombatResult::Victory,
        )?;
        self.phase = CombatPhase::Victory;
        let weapon_val = self.weapon.and_then(|id| store.train_weapon(id));
        tracing::info!(enemy = %self.enemy.name, ?weapon_val, "fight won");
        store.commit()?;
        Ok(AssaultOutcome::Victory { record, weapon_val })
    }

    /// Test luck to sway the last round.
    ///
    /// At most one test per round, and only right after a round in which
    /// someone lost stamina; the next assault offers it again. Running out
    /// of luck is reported and leaves the test available.
    ///
    /// The luck point and the stamina changes stand even if saving them
    /// fails; the storage error is returned and the test is used up.
    pub fn test_luck<S: KeyValueStore, SD: DieSource>(
        &mut self,
        store: &mut AdventureStore<S, SD>,
    ) -> StoreResult<CombatLuck> {
        self.ensure_live()?;
        let CombatPhase::Resolved(outcome) = self.phase else {
            return Err(StoreError::LuckNotOffered);
        };
        if self.luck_used {
            return Err(StoreError::LuckNotOffered);
        }
        let effect = luck_effect(outcome, true).ok_or(StoreError::LuckNotOffered)?;
        self.guard(store)?;

        let test = store.spend_luck()?;
        self.luck_used = true;
        let effect = if test.success {
            effect
        } else {
            luck_effect(outcome, false).unwrap_or_default()
        };
        self.enemy.stamina = (self.enemy.stamina + effect.enemy_stamina).max(0);
        if effect.player_stamina != 0 {
            store.shift_stat(Stat::Stamina, effect.player_stamina);
        }
        tracing::debug!(success = test.success, ?effect, "luck tested in combat");
        store.commit()?;
        Ok(CombatLuck { test, effect })
    }

    /// Choose the weapon for later rounds. `None` fights bare-handed.
    /// Weapons not in the pack are ignored.
    pub fn select_weapon<S: KeyValueStore, SD: DieSource>(
        &mut self,
        store: &AdventureStore<S, SD>,
        weapon: Option<EntryId>,
    ) -> StoreResult<()> {
        self.ensure_live()?;
        self.guard(store)?;
        match weapon {
            Some(id) if store.character().weapon(id).is_none() => {
                tracing::debug!(%id, "selection of unknown weapon ignored");
            }
            _ => self.weapon = weapon,
        }
        Ok(())
    }

    /// Ask to run away. Only possible while the fight is on.
    pub fn request_flee(&self) -> StoreResult<FleeRequest> {
        self.ensure_live()?;
        Ok(FleeRequest { round: self.round })
    }

    /// Run away. Nothing is logged.
    pub fn flee(&mut self, request: FleeRequest) -> StoreResult<()> {
        self.ensure_live()?;
        if request.round != self.round {
            return Err(StoreError::StaleConfirmation);
        }
        self.phase = CombatPhase::Fled;
        tracing::info!(enemy = %self.enemy.name, "fled");
        Ok(())
    }

    /// Rename the enemy.
    pub fn rename_enemy(&mut self, name: impl Into<String>) -> StoreResult<()> {
        self.ensure_live()?;
        self.enemy.name = name.into();
        Ok(())
    }

    /// Set the enemy's skill, floored at zero.
    pub fn set_enemy_skill(&mut self, skill: i32) -> StoreResult<()> {
        self.ensure_live()?;
        self.enemy.skill = skill.max(0);
        Ok(())
    }

    /// Change the enemy's stamina, floored at zero. Returns the new value.
    pub fn adjust_enemy_stamina(&mut self, delta: i32) -> StoreResult<i32> {
        self.ensure_live()?;
        self.enemy.stamina = self.enemy.stamina.saturating_add(delta).max(0);
        Ok(self.enemy.stamina)
    }
}
