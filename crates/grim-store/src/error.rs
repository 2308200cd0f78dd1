//! Error types for the adventure store and combat sessions.

use grim_core::{CoreError, INVENTORY_CAPACITY};
use grim_mechanics::MechError;
use thiserror::Error;

use crate::storage::StorageError;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by store actions and combat sessions.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A mutation was attempted before `load()`.
    #[error("the adventure has not been loaded yet")]
    NotLoaded,

    /// Adding would exceed the shared item and weapon capacity.
    #[error("your pack is full ({capacity} items and weapons at most)")]
    InventoryFull {
        /// The capacity that was hit.
        capacity: usize,
    },

    /// The only remaining profile cannot be deleted.
    #[error("cannot delete the last adventure")]
    LastProfile,

    /// A luck test was attempted with no luck left.
    #[error("you have no luck left")]
    NoLuck,

    /// A heptagram slot outside `0..7`.
    #[error("heptagram slot {0} does not exist (slots are 0 to 6)")]
    InvalidSlot(usize),

    /// A confirmation was superseded, or issued for another profile.
    #[error("this confirmation is no longer valid")]
    StaleConfirmation,

    /// The combat session has already ended.
    #[error("the fight is over")]
    CombatOver,

    /// No luck test is available at this point of the round.
    #[error("luck can only be tested once, right after a decisive round")]
    LuckNotOffered,

    /// The active profile changed since the combat session began.
    #[error("the active adventure changed during the fight")]
    ProfileChanged,

    /// Writing or reading the save failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The save could not be encoded.
    #[error(transparent)]
    Core(CoreError),

    /// A rules error other than running out of luck.
    #[error(transparent)]
    Mechanics(MechError),
}

impl StoreError {
    /// The full-pack rejection.
    pub fn inventory_full() -> Self {
        Self::InventoryFull {
            capacity: INVENTORY_CAPACITY,
        }
    }

    /// Whether this is a validation rejection: nothing was mutated and the
    /// message is meant for the player.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::NotLoaded
                | Self::InventoryFull { .. }
                | Self::LastProfile
                | Self::NoLuck
                | Self::InvalidSlot(_)
                | Self::StaleConfirmation
                | Self::CombatOver
                | Self::LuckNotOffered
                | Self::ProfileChanged
        )
    }
}

impl From<MechError> for StoreError {
    fn from(e: MechError) -> Self {
        match e {
            MechError::NoLuck => Self::NoLuck,
            other => Self::Mechanics(other),
        }
    }
}

impl From<CoreError> for StoreError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidSlot(slot) => Self::InvalidSlot(slot),
            other => Self::Core(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_are_flagged() {
        assert!(StoreError::NoLuck.is_rejection());
        assert!(StoreError::inventory_full().is_rejection());
        let io = std::io::Error::other("disk gone");
        assert!(!StoreError::Storage(io.into()).is_rejection());
    }

    #[test]
    fn lower_layer_errors_map_onto_rejections() {
        assert!(matches!(
            StoreError::from(MechError::NoLuck),
            StoreError::NoLuck
        ));
        assert!(matches!(
            StoreError::from(CoreError::InvalidSlot(9)),
            StoreError::InvalidSlot(9)
        ));
    }

    #[test]
    fn inventory_message() {
        insta::assert_snapshot!(
            StoreError::inventory_full().to_string(),
            @"your pack is full (10 items and weapons at most)"
        );
    }
}
