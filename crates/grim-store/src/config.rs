//! Configuration for an adventure store.

use chrono::{DateTime, Utc};
use grim_core::{CharacterState, IdGenerator, Weapon};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "ldvelh_data_web_v1";

/// Name given to the profile created on first launch.
pub const DEFAULT_PROFILE_NAME: &str = "Aventure 1";

/// A weapon every new adventure starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartingWeapon {
    /// Weapon name.
    pub name: String,
    /// Mastery potential.
    pub pot: i32,
    /// Starting mastery, clamped to `-pot..=pot`.
    pub val: i32,
}

/// What a new adventure begins with before stats are rolled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartingKit {
    /// Provisions in the pack.
    pub provisions: u32,
    /// Optional weapon.
    pub weapon: Option<StartingWeapon>,
}

impl Default for StartingKit {
    fn default() -> Self {
        Self {
            provisions: 4,
            weapon: Some(StartingWeapon {
                name: "Poignard".to_string(),
                pot: 2,
                val: 2,
            }),
        }
    }
}

impl StartingKit {
    /// Set the starting provisions.
    pub fn with_provisions(mut self, provisions: u32) -> Self {
        self.provisions = provisions;
        self
    }

    /// Set the starting weapon.
    pub fn with_weapon(mut self, name: impl Into<String>, pot: i32, val: i32) -> Self {
        self.weapon = Some(StartingWeapon {
            name: name.into(),
            pot,
            val,
        });
        self
    }

    /// Start with no weapon.
    pub fn without_weapon(mut self) -> Self {
        self.weapon = None;
        self
    }

    /// A zeroed character carrying this kit.
    pub fn new_adventure(&self, ids: &mut IdGenerator) -> CharacterState {
        let mut state = CharacterState {
            provisions: self.provisions,
            ..CharacterState::default()
        };
        if let Some(w) = &self.weapon {
            state
                .weapons
                .push(Weapon::with_mastery(ids.entry_id(), &w.name, w.pot, w.val));
        }
        state
    }
}

/// Configuration for an [`AdventureStore`](crate::AdventureStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key the save blob is stored under.
    pub storage_key: String,
    /// Name of the profile created when no save exists.
    pub default_profile_name: String,
    /// Kit for fresh profiles and rerolls.
    pub starting_kit: StartingKit,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_profile_name: DEFAULT_PROFILE_NAME.to_string(),
            starting_kit: StartingKit::default(),
        }
    }
}

impl StoreConfig {
    /// Set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the name of the first profile.
    pub fn with_default_profile_name(mut self, name: impl Into<String>) -> Self {
        self.default_profile_name = name.into();
        self
    }

    /// Set the starting kit.
    pub fn with_starting_kit(mut self, kit: StartingKit) -> Self {
        self.starting_kit = kit;
        self
    }

    /// Key that receives a save found unreadable at `at`.
    pub fn backup_key(&self, at: DateTime<Utc>) -> String {
        format!("{}.corrupt-{}", self.storage_key, at.format("%Y%m%dT%H%M%S"))
    }
}
