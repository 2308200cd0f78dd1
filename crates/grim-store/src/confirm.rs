//! Two-phase confirmation of destructive actions.
//!
//! Requesting an action hands back a [`Confirmation`]; passing it to
//! [`AdventureStore::confirm`](crate::AdventureStore::confirm) performs the
//! action. Dropping the token declines it. Only the most recent request is
//! live, and it is tied to the profile that was active when it was issued.

use grim_core::{EntryId, ProfileId};

/// A destructive action awaiting confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Delete a profile.
    DeleteProfile(ProfileId),
    /// Reset the active character and roll new stats.
    Reroll,
    /// Drop an item.
    RemoveItem(EntryId),
    /// Drop a weapon.
    RemoveWeapon(EntryId),
    /// Delete one chapter entry.
    RemoveHistoryEntry(EntryId),
    /// Delete the whole chapter history.
    ClearHistory,
    /// Delete a combat-log entry.
    RemoveCombat(EntryId),
}

impl PendingAction {
    /// Question to put to the player.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::DeleteProfile(_) => "Delete this adventure for good?",
            Self::Reroll => "Start a new adventure? The current character is lost.",
            Self::RemoveItem(_) => "Drop this item?",
            Self::RemoveWeapon(_) => "Drop this weapon?",
            Self::RemoveHistoryEntry(_) => "Delete this chapter entry?",
            Self::ClearHistory => "Erase the whole chapter history?",
            Self::RemoveCombat(_) => "Delete this combat entry?",
        }
    }
}

/// Token that must be handed back to carry out a [`PendingAction`].
#[derive(Debug)]
#[must_use = "dropping a confirmation declines the action"]
pub struct Confirmation {
    pub(crate) ticket: u64,
    pub(crate) profile: ProfileId,
    pub(crate) action: PendingAction,
}

impl Confirmation {
    /// The action this token authorizes.
    pub fn action(&self) -> PendingAction {
        self.action
    }

    /// The profile that was active when it was issued.
    pub fn profile(&self) -> ProfileId {
        self.profile
    }
}
