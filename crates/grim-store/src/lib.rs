//! Adventure state for Grimoire.
//!
//! [`AdventureStore`] owns every profile, the live character of the active
//! one, and the save blob written after each change. [`CombatEngine`] runs a
//! single fight against the store's active character.

pub mod combat;
pub mod config;
pub mod confirm;
pub mod error;
pub mod storage;
pub mod store;

pub use combat::{AssaultOutcome, CombatEngine, CombatLuck, CombatPhase, Enemy, FleeRequest};
pub use config::{StartingKit, StartingWeapon, StoreConfig};
pub use confirm::{Confirmation, PendingAction};
pub use error::{StoreError, StoreResult};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage, StorageError, StorageResult};
pub use store::{AdventureStore, CombatField, LoadOutcome};
