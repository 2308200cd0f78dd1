//! The adventure store: every profile, the live character, and persistence.
//!
//! The store owns the list of profiles and a live copy of the active
//! profile's character. Every action mutates the live copy, projects it back
//! into the active profile, bumps [`AdventureStore::revision`], and writes
//! the whole save blob through the configured [`KeyValueStore`].

use chrono::Utc;
use grim_core::{
    ChapterEntry, ChapterTags, CharacterState, CombatRecord, CombatResult, EntryId, IdGenerator,
    Item, Profile, ProfileId, SaveBlob, Stat, Weapon, floor_add,
};
use grim_mechanics::{DieSource, LuckTest, roll_stats, test_luck};

use crate::config::StoreConfig;
use crate::confirm::{Confirmation, PendingAction};
use crate::error::{StoreError, StoreResult};
use crate::storage::KeyValueStore;

/// How `load()` found the save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The store was already loaded; nothing happened.
    AlreadyLoaded,
    /// No save existed; a first profile was created.
    Fresh,
    /// An existing save was read.
    Restored {
        /// Number of profiles read.
        profiles: usize,
    },
    /// The save was unreadable. Its bytes were copied to `backup_key` and
    /// the store started fresh.
    Recovered {
        /// Where the unreadable bytes went.
        backup_key: String,
    },
    /// The storage backend failed to read the save. Nothing was written and
    /// the store stays unloaded; call `load()` again to retry.
    Unreadable {
        /// The backend's error.
        error: String,
    },
}

/// One editable field of a combat-log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatField {
    /// Enemy name.
    Enemy(String),
    /// Enemy skill.
    Skill(i32),
    /// Enemy stamina.
    Stamina(i32),
}

/// Holds every adventure and the live state of the active one.
pub struct AdventureStore<S, D> {
    storage: S,
    die: D,
    config: StoreConfig,
    ids: IdGenerator,
    profiles: Vec<Profile>,
    active_id: Option<ProfileId>,
    live: CharacterState,
    loaded: bool,
    revision: u64,
    pending: Option<u64>,
    next_ticket: u64,
}

impl<S: KeyValueStore, D: DieSource> AdventureStore<S, D> {
    /// Create an unloaded store. Call [`load`](Self::load) before anything else.
    pub fn new(storage: S, die: D, config: StoreConfig) -> Self {
        Self {
            storage,
            die,
            config,
            ids: IdGenerator::new(),
            profiles: Vec::new(),
            active_id: None,
            live: CharacterState::default(),
            loaded: false,
            revision: 0,
            pending: None,
            next_ticket: 0,
        }
    }

    // -- Accessors --

    /// The live character of the active profile.
    pub fn character(&self) -> &CharacterState {
        &self.live
    }

    /// All profiles in creation order.
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Id of the active profile, `None` until loaded.
    pub fn active_id(&self) -> Option<ProfileId> {
        self.active_id
    }

    /// The active profile.
    pub fn active_profile(&self) -> Option<&Profile> {
        let id = self.active_id?;
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Whether `load()` has run.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Counter bumped on every committed change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The blob that would be written right now.
    pub fn snapshot(&self) -> SaveBlob {
        SaveBlob::new(self.profiles.clone(), self.active_id)
    }

    /// The store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    // -- Loading and saving --

    /// Read the save, or start fresh. Runs only once it succeeds.
    ///
    /// A backend read error leaves the store unloaded and the save untouched,
    /// so every action keeps failing with [`StoreError::NotLoaded`] until a
    /// later call reads the save.
    pub fn load(&mut self) -> LoadOutcome {
        if self.loaded {
            return LoadOutcome::AlreadyLoaded;
        }
        let key = self.config.storage_key.clone();
        let bytes = match self.storage.get(&key) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("could not read save \"{key}\": {e}");
                return LoadOutcome::Unreadable {
                    error: e.to_string(),
                };
            }
        };

        let outcome = match bytes {
            None => {
                self.start_fresh();
                LoadOutcome::Fresh
            }
            Some(bytes) => match SaveBlob::from_json(&bytes) {
                Ok(blob) if !blob.profiles.is_empty() => {
                    let count = blob.profiles.len();
                    self.restore(blob);
                    LoadOutcome::Restored { profiles: count }
                }
                Ok(_) => {
                    tracing::info!("save \"{key}\" holds no profiles, starting fresh");
                    self.start_fresh();
                    LoadOutcome::Fresh
                }
                Err(e) => {
                    let backup_key = self.free_backup_key();
                    tracing::warn!("save \"{key}\" is unreadable ({e}), backing up to \"{backup_key}\"");
                    if let Err(e) = self.storage.put(&backup_key, &bytes) {
                        tracing::warn!("could not back up unreadable save: {e}");
                    }
                    self.start_fresh();
                    LoadOutcome::Recovered { backup_key }
                }
            },
        };

        self.loaded = true;
        self.revision += 1;
        if !matches!(outcome, LoadOutcome::Restored { .. })
            && let Err(e) = self.persist()
        {
            tracing::warn!("could not write initial save: {e}");
        }
        tracing::info!(
            profiles = self.profiles.len(),
            active = ?self.active_id,
            "adventure loaded"
        );
        outcome
    }

    /// Write the whole save blob.
    pub fn persist(&mut self) -> StoreResult<()> {
        self.ensure_loaded()?;
        let bytes = self.snapshot().to_json()?;
        self.storage.put(&self.config.storage_key, &bytes)?;
        tracing::debug!(revision = self.revision, bytes = bytes.len(), "saved");
        Ok(())
    }

    /// A timestamped backup key that holds nothing yet.
    fn free_backup_key(&self) -> String {
        let base = self.config.backup_key(Utc::now());
        let mut key = base.clone();
        let mut n = 1;
        while matches!(self.storage.get(&key), Ok(Some(_))) {
            n += 1;
            key = format!("{base}-{n}");
        }
        key
    }

    fn start_fresh(&mut self) {
        let data = self.config.starting_kit.new_adventure(&mut self.ids);
        let profile = Profile::new(
            self.ids.profile_id(),
            self.config.default_profile_name.clone(),
            data,
        );
        self.active_id = Some(profile.id);
        self.live = profile.data.clone();
        self.profiles = vec![profile];
    }

    fn restore(&mut self, blob: SaveBlob) {
        let active = blob.resolve_active();
        for profile in &blob.profiles {
            self.ids.observe(profile.id.0);
            for id in profile.data.entry_ids() {
                self.ids.observe(id.0);
            }
        }
        self.profiles = blob.profiles;
        self.active_id = active;
        self.live = self
            .active_profile()
            .map(|p| p.data.clone())
            .unwrap_or_default();
    }

    fn ensure_loaded(&self) -> StoreResult<()> {
        if self.loaded {
            Ok(())
        } else {
            Err(StoreError::NotLoaded)
        }
    }

    /// Project the live state into the active profile, then save.
    pub(crate) fn commit(&mut self) -> StoreResult<()> {
        if let Some(id) = self.active_id
            && let Some(profile) = self.profiles.iter_mut().find(|p| p.id == id)
        {
            profile.data = self.live.clone();
        }
        self.revision += 1;
        self.persist()
    }

    /// Record a profile-list change that leaves the live state as is.
    fn commit_profiles(&mut self) -> StoreResult<()> {
        self.revision += 1;
        self.persist()
    }

    // -- Profiles --

    /// Start a new adventure and make it active.
    pub fn add_profile(&mut self, name: impl Into<String>) -> StoreResult<ProfileId> {
        self.ensure_loaded()?;
        let data = self.config.starting_kit.new_adventure(&mut self.ids);
        let profile = Profile::new(self.ids.profile_id(), name, data);
        let id = profile.id;
        tracing::info!(%id, name = %profile.name, "profile created");
        self.live = profile.data.clone();
        self.profiles.push(profile);
        self.active_id = Some(id);
        self.pending = None;
        self.commit_profiles()?;
        Ok(id)
    }

    /// Make another profile active. Unknown ids are ignored.
    pub fn switch_profile(&mut self, id: ProfileId) -> StoreResult<()> {
        self.ensure_loaded()?;
        if self.active_id == Some(id) {
            return Ok(());
        }
        let Some(profile) = self.profiles.iter().find(|p| p.id == id) else {
            tracing::debug!(%id, "switch to unknown profile ignored");
            return Ok(());
        };
        self.live = profile.data.clone();
        self.active_id = Some(id);
        self.pending = None;
        tracing::info!(%id, "profile switched");
        self.commit_profiles()
    }

    /// Rename a profile. Unknown ids are ignored.
    pub fn rename_profile(&mut self, id: ProfileId, name: impl Into<String>) -> StoreResult<()> {
        self.ensure_loaded()?;
        let Some(profile) = self.profiles.iter_mut().find(|p| p.id == id) else {
            tracing::debug!(%id, "rename of unknown profile ignored");
            return Ok(());
        };
        profile.name = name.into();
        self.commit_profiles()
    }

    fn delete_profile(&mut self, id: ProfileId) -> StoreResult<()> {
        if self.profiles.len() <= 1 {
            return Err(StoreError::LastProfile);
        }
        let Some(index) = self.profiles.iter().position(|p| p.id == id) else {
            tracing::debug!(%id, "delete of unknown profile ignored");
            return Ok(());
        };
        self.profiles.remove(index);
        tracing::info!(%id, "profile deleted");
        if self.active_id == Some(id) {
            let first = &self.profiles[0];
            self.active_id = Some(first.id);
            self.live = first.data.clone();
        }
        self.commit_profiles()
    }

    // -- Confirmations --

    /// Ask to perform a destructive action. Supersedes any earlier request.
    pub fn request(&mut self, action: PendingAction) -> StoreResult<Confirmation> {
        self.ensure_loaded()?;
        self.check_precondition(action)?;
        let profile = self.active_id.ok_or(StoreError::NotLoaded)?;
        self.next_ticket += 1;
        self.pending = Some(self.next_ticket);
        Ok(Confirmation {
            ticket: self.next_ticket,
            profile,
            action,
        })
    }

    /// Carry out a previously requested action.
    pub fn confirm(&mut self, confirmation: Confirmation) -> StoreResult<()> {
        self.ensure_loaded()?;
        if self.pending != Some(confirmation.ticket)
            || self.active_id != Some(confirmation.profile)
        {
            return Err(StoreError::StaleConfirmation);
        }
        self.check_precondition(confirmation.action)?;
        self.pending = None;
        match confirmation.action {
            PendingAction::DeleteProfile(id) => self.delete_profile(id),
            PendingAction::Reroll => self.reroll(),
            PendingAction::RemoveItem(id) => {
                self.remove_entry(id, |s| &mut s.items, |i: &Item| i.id, "item")
            }
            PendingAction::RemoveWeapon(id) => {
                self.remove_entry(id, |s| &mut s.weapons, |w: &Weapon| w.id, "weapon")
            }
            PendingAction::RemoveHistoryEntry(id) => {
                self.remove_entry(id, |s| &mut s.history, |h: &ChapterEntry| h.id, "chapter entry")
            }
            PendingAction::RemoveCombat(id) => {
                self.remove_entry(id, |s| &mut s.combats, |c: &CombatRecord| c.id, "combat entry")
            }
            PendingAction::ClearHistory => {
                self.live.history.clear();
                self.commit()
            }
        }
    }

    fn check_precondition(&self, action: PendingAction) -> StoreResult<()> {
        match action {
            PendingAction::DeleteProfile(_) if self.profiles.len() <= 1 => {
                Err(StoreError::LastProfile)
            }
            _ => Ok(()),
        }
    }

    fn remove_entry<T>(
        &mut self,
        id: EntryId,
        list: impl FnOnce(&mut CharacterState) -> &mut Vec<T>,
        id_of: impl Fn(&T) -> EntryId,
        what: &str,
    ) -> StoreResult<()> {
        let entries = list(&mut self.live);
        let before = entries.len();
        entries.retain(|e| id_of(e) != id);
        if entries.len() == before {
            tracing::debug!(%id, "remove of unknown {what} ignored");
            return Ok(());
        }
        self.commit()
    }

    // -- Character --

    /// Reset the active character and roll new stats.
    ///
    /// With `silent` the reroll happens at once. Otherwise a confirmation is
    /// returned and nothing changes until it is confirmed.
    pub fn roll_new_char(&mut self, silent: bool) -> StoreResult<Option<Confirmation>> {
        self.ensure_loaded()?;
        if silent {
            self.reroll()?;
            Ok(None)
        } else {
            self.request(PendingAction::Reroll).map(Some)
        }
    }

    fn reroll(&mut self) -> StoreResult<()> {
        let mut state = self.config.starting_kit.new_adventure(&mut self.ids);
        roll_stats(&mut self.die).apply(&mut state);
        self.live = state;
        tracing::info!(
            skill = self.live.skill.init,
            stamina = self.live.stamina.init,
            luck = self.live.luck.init,
            "new character rolled"
        );
        self.commit()
    }

    /// Change a stat's current value, clamped to `0..=init`. Returns the
    /// new current value.
    pub fn mod_stat(&mut self, stat: Stat, delta: i32) -> StoreResult<i32> {
        self.ensure_loaded()?;
        let cur = self.shift_stat(stat, delta);
        self.commit()?;
        Ok(cur)
    }

    pub(crate) fn shift_stat(&mut self, stat: Stat, delta: i32) -> i32 {
        self.live.stat_mut(stat).modify(delta)
    }

    /// Test luck with the store's dice, spending one point.
    pub fn test_luck(&mut self) -> StoreResult<LuckTest> {
        let test = self.spend_luck()?;
        self.commit()?;
        Ok(test)
    }

    /// Roll a luck test against the live state without saving.
    pub(crate) fn spend_luck(&mut self) -> StoreResult<LuckTest> {
        self.ensure_loaded()?;
        Ok(test_luck(&mut self.live.luck, &mut self.die)?)
    }

    /// Add to gold, never going below zero.
    pub fn mod_gold(&mut self, delta: i32) -> StoreResult<u32> {
        self.ensure_loaded()?;
        self.live.gold = floor_add(self.live.gold, delta);
        self.commit()?;
        Ok(self.live.gold)
    }

    /// Add to provisions, never going below zero.
    pub fn mod_provisions(&mut self, delta: i32) -> StoreResult<u32> {
        self.ensure_loaded()?;
        self.live.provisions = floor_add(self.live.provisions, delta);
        self.commit()?;
        Ok(self.live.provisions)
    }

    /// Replace the free-form notes.
    pub fn set_notes(&mut self, text: impl Into<String>) -> StoreResult<()> {
        self.ensure_loaded()?;
        self.live.notes = text.into();
        self.commit()
    }

    /// Write one heptagram slot.
    pub fn update_heptagram(&mut self, slot: usize, text: impl Into<String>) -> StoreResult<()> {
        self.ensure_loaded()?;
        self.live.heptagram.set(slot, text)?;
        self.commit()
    }

    // -- Inventory --

    /// Add an item if the pack has room.
    pub fn add_item(&mut self, name: impl Into<String>) -> StoreResult<EntryId> {
        self.ensure_loaded()?;
        if !self.live.has_room() {
            return Err(StoreError::inventory_full());
        }
        let id = self.ids.entry_id();
        self.live.items.push(Item {
            id,
            name: name.into(),
        });
        self.commit()?;
        Ok(id)
    }

    /// Add an untrained weapon if the pack has room.
    pub fn add_weapon(&mut self, name: impl Into<String>, pot: i32) -> StoreResult<EntryId> {
        self.ensure_loaded()?;
        if !self.live.has_room() {
            return Err(StoreError::inventory_full());
        }
        let id = self.ids.entry_id();
        self.live.weapons.push(Weapon::new(id, name, pot));
        self.commit()?;
        Ok(id)
    }

    /// Raise a weapon's mastery by one, up to its potential. Returns the new
    /// mastery, or `None` for an unknown weapon.
    pub fn improve_weapon(&mut self, id: EntryId) -> StoreResult<Option<i32>> {
        self.ensure_loaded()?;
        let Some(val) = self.train_weapon(id) else {
            tracing::debug!(%id, "improve of unknown weapon ignored");
            return Ok(None);
        };
        self.commit()?;
        Ok(Some(val))
    }

    pub(crate) fn train_weapon(&mut self, id: EntryId) -> Option<i32> {
        self.live.weapon_mut(id).map(Weapon::improve)
    }

    // -- History --

    /// Append a chapter entry.
    pub fn add_history_entry(
        &mut self,
        chap: impl Into<String>,
        tags: ChapterTags,
        notes: impl Into<String>,
    ) -> StoreResult<EntryId> {
        self.ensure_loaded()?;
        let id = self.ids.entry_id();
        self.live.history.push(ChapterEntry {
            id,
            chap: chap.into(),
            tags,
            notes: notes.into(),
        });
        self.commit()?;
        Ok(id)
    }

    // -- Combat log --

    /// Record a finished fight. The enemy is marked dead on victory.
    pub fn log_combat(
        &mut self,
        enemy: impl Into<String>,
        skill: i32,
        stamina: i32,
        result: CombatResult,
    ) -> StoreResult<EntryId> {
        let id = self.record_combat(enemy, skill, stamina, result)?;
        self.commit()?;
        Ok(id)
    }

    /// Append a finished fight to the live log without saving.
    pub(crate) fn record_combat(
        &mut self,
        enemy: impl Into<String>,
        skill: i32,
        stamina: i32,
        result: CombatResult,
    ) -> StoreResult<EntryId> {
        self.ensure_loaded()?;
        let id = self.ids.entry_id();
        self.live.combats.push(CombatRecord {
            id,
            enemy: enemy.into(),
            skill,
            stam: stamina,
            dead: result == CombatResult::Victory,
            result: Some(result),
        });
        Ok(id)
    }

    /// Append a blank combat-log entry for manual tracking.
    pub fn add_combat(&mut self) -> StoreResult<EntryId> {
        self.ensure_loaded()?;
        let id = self.ids.entry_id();
        self.live.combats.push(CombatRecord {
            id,
            enemy: String::new(),
            skill: 0,
            stam: 0,
            dead: false,
            result: None,
        });
        self.commit()?;
        Ok(id)
    }

    /// Edit one field of a combat-log entry. Unknown ids are ignored.
    pub fn update_combat(&mut self, id: EntryId, field: CombatField) -> StoreResult<()> {
        self.ensure_loaded()?;
        let Some(record) = self.live.combat_mut(id) else {
            tracing::debug!(%id, "update of unknown combat entry ignored");
            return Ok(());
        };
        match field {
            CombatField::Enemy(name) => record.enemy = name,
            CombatField::Skill(skill) => record.skill = skill,
            CombatField::Stamina(stam) => record.stam = stam,
        }
        self.commit()
    }

    /// Flip the dead marker of a combat-log entry. Unknown ids are ignored.
    pub fn toggle_combat_dead(&mut self, id: EntryId) -> StoreResult<()> {
        self.ensure_loaded()?;
        let Some(record) = self.live.combat_mut(id) else {
            tracing::debug!(%id, "toggle of unknown combat entry ignored");
            return Ok(());
        };
        record.dead = !record.dead;
        self.commit()
    }
}
