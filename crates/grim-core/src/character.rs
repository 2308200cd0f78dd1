//! The full mutable state of one adventure.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::id::EntryId;
use crate::stat::{Stat, StatPair};

/// Maximum number of items and weapons carried together.
pub const INVENTORY_CAPACITY: usize = 10;

/// Number of symbolic slots on the heptagram.
pub const HEPTAGRAM_SLOTS: usize = 7;

/// A carried item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Entry id.
    pub id: EntryId,
    /// Item name.
    pub name: String,
}

/// A weapon with a trainable mastery value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    /// Entry id.
    pub id: EntryId,
    /// Weapon name.
    pub name: String,
    /// Fixed potential. Mastery ranges over `-pot..=pot`.
    pub pot: i32,
    /// Current mastery, added to attack rolls.
    pub val: i32,
}

impl Weapon {
    /// A new, untrained weapon: mastery starts at `-pot`.
    pub fn new(id: EntryId, name: impl Into<String>, pot: i32) -> Self {
        let pot = pot.max(0);
        Self {
            id,
            name: name.into(),
            pot,
            val: -pot,
        }
    }

    /// A weapon with an explicit mastery, clamped into range.
    pub fn with_mastery(id: EntryId, name: impl Into<String>, pot: i32, val: i32) -> Self {
        let mut weapon = Self::new(id, name, pot);
        weapon.val = val.clamp(-weapon.pot, weapon.pot);
        weapon
    }

    /// Raise mastery by one, never past `pot`. Returns the new mastery.
    pub fn improve(&mut self) -> i32 {
        self.val = (self.val + 1).min(self.pot);
        self.val
    }

    /// Returns true once mastery has reached the potential.
    pub fn is_mastered(&self) -> bool {
        self.val >= self.pot
    }

    fn normalize(&mut self) {
        self.pot = self.pot.max(0);
        self.val = self.val.clamp(-self.pot, self.pot);
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:+}/{})", self.name, self.val, self.pot)
    }
}

/// How a logged combat ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatResult {
    /// The enemy was defeated.
    Victory,
    /// The character fell.
    Defeat,
}

impl fmt::Display for CombatResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Victory => write!(f, "victory"),
            Self::Defeat => write!(f, "defeat"),
        }
    }
}

/// One entry in the combat log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRecord {
    /// Entry id.
    pub id: EntryId,
    /// Enemy name.
    #[serde(default)]
    pub enemy: String,
    /// Enemy skill.
    #[serde(default)]
    pub skill: i32,
    /// Enemy stamina at the time of recording.
    #[serde(default)]
    pub stam: i32,
    /// Whether the enemy is dead.
    #[serde(default)]
    pub dead: bool,
    /// Outcome, for fights resolved in the arena.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<CombatResult>,
}

/// Markers on a chapter entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChapterTags {
    /// A fight happened.
    pub combat: bool,
    /// An item was found.
    pub item: bool,
    /// A meal was eaten.
    pub food: bool,
    /// A crucial choice was made.
    pub choice: bool,
}

impl fmt::Display for ChapterTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = [
            (self.combat, "combat"),
            (self.item, "item"),
            (self.food, "food"),
            (self.choice, "choice"),
        ]
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, label)| *label)
        .collect();
        write!(f, "{}", labels.join(", "))
    }
}

/// One visited chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterEntry {
    /// Entry id.
    pub id: EntryId,
    /// Chapter label, usually a paragraph number.
    pub chap: String,
    /// Event markers.
    #[serde(default)]
    pub tags: ChapterTags,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
}

/// Seven independently editable symbol slots.
///
/// Persisted as a list; shorter lists are padded with blanks and longer
/// ones truncated when read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Heptagram([String; HEPTAGRAM_SLOTS]);

impl Heptagram {
    /// All slots in order.
    pub fn slots(&self) -> &[String; HEPTAGRAM_SLOTS] {
        &self.0
    }

    /// Read one slot.
    pub fn get(&self, slot: usize) -> Option<&str> {
        self.0.get(slot).map(String::as_str)
    }

    /// Overwrite one slot.
    pub fn set(&mut self, slot: usize, text: impl Into<String>) -> CoreResult<()> {
        let cell = self.0.get_mut(slot).ok_or(CoreError::InvalidSlot(slot))?;
        *cell = text.into();
        Ok(())
    }
}

impl From<Vec<String>> for Heptagram {
    fn from(values: Vec<String>) -> Self {
        let mut slots: [String; HEPTAGRAM_SLOTS] = Default::default();
        for (cell, value) in slots.iter_mut().zip(values) {
            *cell = value;
        }
        Self(slots)
    }
}

impl From<Heptagram> for Vec<String> {
    fn from(h: Heptagram) -> Self {
        h.0.into()
    }
}

/// Everything tracked for one adventure.
///
/// `Default` is the zeroed, empty state. Missing fields in persisted data
/// fall back to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterState {
    /// Skill pair.
    pub skill: StatPair,
    /// Stamina pair.
    pub stamina: StatPair,
    /// Luck pair.
    pub luck: StatPair,
    /// Gold pieces.
    pub gold: u32,
    /// Meals carried.
    pub provisions: u32,
    /// Carried items in pickup order.
    pub items: Vec<Item>,
    /// Carried weapons in pickup order.
    pub weapons: Vec<Weapon>,
    /// Combat log.
    pub combats: Vec<CombatRecord>,
    /// Free-form notes.
    pub notes: String,
    /// Heptagram slots.
    pub heptagram: Heptagram,
    /// Visited chapters.
    pub history: Vec<ChapterEntry>,
}

impl CharacterState {
    /// Read a stat pair.
    pub fn stat(&self, stat: Stat) -> &StatPair {
        match stat {
            Stat::Skill => &self.skill,
            Stat::Stamina => &self.stamina,
            Stat::Luck => &self.luck,
        }
    }

    /// Get a mutable stat pair.
    pub fn stat_mut(&mut self, stat: Stat) -> &mut StatPair {
        match stat {
            Stat::Skill => &mut self.skill,
            Stat::Stamina => &mut self.stamina,
            Stat::Luck => &mut self.luck,
        }
    }

    /// Items plus weapons currently carried.
    pub fn inventory_count(&self) -> usize {
        self.items.len() + self.weapons.len()
    }

    /// Returns true if one more item or weapon fits.
    pub fn has_room(&self) -> bool {
        self.inventory_count() < INVENTORY_CAPACITY
    }

    /// Find a weapon by id.
    pub fn weapon(&self, id: EntryId) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.id == id)
    }

    /// Find a weapon by id, mutably.
    pub fn weapon_mut(&mut self, id: EntryId) -> Option<&mut Weapon> {
        self.weapons.iter_mut().find(|w| w.id == id)
    }

    /// Find a combat record by id, mutably.
    pub fn combat_mut(&mut self, id: EntryId) -> Option<&mut CombatRecord> {
        self.combats.iter_mut().find(|c| c.id == id)
    }

    /// Every entry id held by this state.
    pub fn entry_ids(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.items
            .iter()
            .map(|i| i.id)
            .chain(self.weapons.iter().map(|w| w.id))
            .chain(self.combats.iter().map(|c| c.id))
            .chain(self.history.iter().map(|h| h.id))
    }

    /// Clamp every bounded field back into range after reading untrusted data.
    pub fn normalize(&mut self) {
        for stat in Stat::ALL {
            self.stat_mut(stat).normalize();
        }
        for weapon in &mut self.weapons {
            weapon.normalize();
        }
    }
}

/// Add a signed delta to a counter that never goes below zero.
pub fn floor_add(value: u32, delta: i32) -> u32 {
    let sum = i64::from(value) + i64::from(delta);
    u32::try_from(sum.max(0)).unwrap_or(u32::MAX)
}
