//! Adventure profiles and the persisted save layout.

use serde::{Deserialize, Serialize};

use crate::character::CharacterState;
use crate::error::{CoreError, CoreResult};
use crate::id::ProfileId;

/// Current save schema version.
///
/// Version 0 is the unversioned layout; it has the same shape and is read
/// as-is, then written back as the current version.
pub const SCHEMA_VERSION: u32 = 1;

/// One independent adventure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Immutable identity.
    pub id: ProfileId,
    /// Display name. Not required to be unique.
    pub name: String,
    /// Saved character state.
    #[serde(default)]
    pub data: CharacterState,
}

impl Profile {
    /// Create a profile around an existing state.
    pub fn new(id: ProfileId, name: impl Into<String>, data: CharacterState) -> Self {
        Self {
            id,
            name: name.into(),
            data,
        }
    }
}

/// The whole persisted store: every profile plus the active pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveBlob {
    /// Schema version the blob was written with.
    #[serde(default)]
    pub version: u32,
    /// All profiles in creation order.
    #[serde(default)]
    pub profiles: Vec<Profile>,
    /// The profile that was active when saved.
    #[serde(default, rename = "activeId")]
    pub active_id: Option<ProfileId>,
}

impl SaveBlob {
    /// Build a blob stamped with the current schema version.
    pub fn new(profiles: Vec<Profile>, active_id: Option<ProfileId>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            profiles,
            active_id,
        }
    }

    /// Decode a blob, rejecting schemas newer than this build.
    ///
    /// Older blobs are upgraded in memory and every character state is
    /// normalized so loaded data satisfies the model's bounds.
    pub fn from_json(bytes: &[u8]) -> CoreResult<Self> {
        let mut blob: SaveBlob = serde_json::from_slice(bytes)?;
        if blob.version > SCHEMA_VERSION {
            return Err(CoreError::UnsupportedVersion {
                found: blob.version,
                supported: SCHEMA_VERSION,
            });
        }
        blob.version = SCHEMA_VERSION;
        for profile in &mut blob.profiles {
            profile.data.normalize();
        }
        Ok(blob)
    }

    /// Encode the blob as JSON.
    pub fn to_json(&self) -> CoreResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// The id the store should activate: the saved pointer if it names an
    /// existing profile, otherwise the first profile.
    pub fn resolve_active(&self) -> Option<ProfileId> {
        self.active_id
            .filter(|id| self.profiles.iter().any(|p| p.id == *id))
            .or_else(|| self.profiles.first().map(|p| p.id))
    }
}
