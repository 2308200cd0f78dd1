use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Identifier of an adventure profile.
///
/// Serialized as a bare JSON number so saves stay readable by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub u64);

/// Identifier of an entry inside a character state (item, weapon, combat
/// record, or chapter entry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mints ids from the wall clock in milliseconds.
///
/// Ids are strictly increasing for the lifetime of the generator, so two
/// ids requested within the same millisecond never collide. Call
/// [`IdGenerator::observe`] with every id read from disk to keep new ids
/// clear of persisted ones even if the clock went backwards.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// Create a generator that has not issued any id yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an id that already exists so it is never handed out again.
    pub fn observe(&mut self, raw: u64) {
        self.last = self.last.max(raw);
    }

    /// Issue the next raw id.
    pub fn next_raw(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.last = now.max(self.last.saturating_add(1));
        self.last
    }

    /// Issue a new profile id.
    pub fn profile_id(&mut self) -> ProfileId {
        ProfileId(self.next_raw())
    }

    /// Issue a new entry id.
    pub fn entry_id(&mut self) -> EntryId {
        EntryId(self.next_raw())
    }
}
