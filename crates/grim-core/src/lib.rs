//! Core types for Grimoire: adventure profiles, character state, and the
//! persisted save layout.
//!
//! This crate is pure data. Dice live in `grim-mechanics`; mutation rules,
//! persistence, and combat live in `grim-store`.

/// Character state: stats, inventory, combat log, history.
pub mod character;
/// Error types used throughout the crate.
pub mod error;
/// Profile and entry identifiers.
pub mod id;
/// Profiles and the save blob.
pub mod profile;
/// Capped stat pairs.
pub mod stat;

/// Re-export character types.
pub use character::{
    CharacterState, ChapterEntry, ChapterTags, CombatRecord, CombatResult, HEPTAGRAM_SLOTS,
    Heptagram, INVENTORY_CAPACITY, Item, Weapon, floor_add,
};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export identifiers.
pub use id::{EntryId, IdGenerator, ProfileId};
/// Re-export profile types.
pub use profile::{Profile, SCHEMA_VERSION, SaveBlob};
/// Re-export stat types.
pub use stat::{Stat, StatPair};
