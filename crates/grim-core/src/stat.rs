//! Capped character statistics (Skill, Stamina, Luck).
//!
//! A stat pair holds the initial value rolled at character creation and the
//! current value, which is clamped to `0..=init` on every change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// An `{init, cur}` pair for a capped, regenerable resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatPair {
    /// Value rolled at character creation. Acts as the ceiling.
    pub init: i32,
    /// Current value, always within `0..=init`.
    pub cur: i32,
}

impl StatPair {
    /// A freshly rolled stat: current equals initial.
    pub fn rolled(value: i32) -> Self {
        let value = value.max(0);
        Self {
            init: value,
            cur: value,
        }
    }

    /// Add `delta` to the current value, clamping to `0..=init`.
    /// Returns the new current value.
    pub fn modify(&mut self, delta: i32) -> i32 {
        self.cur = self.cur.saturating_add(delta).clamp(0, self.ceiling());
        self.cur
    }

    /// Re-establish `0 <= cur <= init` after reading untrusted data.
    pub fn normalize(&mut self) {
        self.init = self.init.max(0);
        self.cur = self.cur.clamp(0, self.init);
    }

    /// Returns true if the current value is zero.
    pub fn is_depleted(&self) -> bool {
        self.cur <= 0
    }

    fn ceiling(&self) -> i32 {
        self.init.max(0)
    }
}

impl fmt::Display for StatPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.cur, self.init)
    }
}

/// One of the three character statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    /// Fighting ability, added to every attack roll.
    Skill,
    /// Health; the character dies at zero.
    Stamina,
    /// Spent on luck tests.
    Luck,
}

impl Stat {
    /// All stats in sheet order.
    pub const ALL: [Stat; 3] = [Stat::Skill, Stat::Stamina, Stat::Luck];
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skill => write!(f, "skill"),
            Self::Stamina => write!(f, "stamina"),
            Self::Luck => write!(f, "luck"),
        }
    }
}

impl FromStr for Stat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skill" | "habilete" | "habileté" => Ok(Self::Skill),
            "stamina" | "endurance" => Ok(Self::Stamina),
            "luck" | "chance" => Ok(Self::Luck),
            other => Err(CoreError::UnknownStat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rolled_starts_full() {
        let s = StatPair::rolled(10);
        assert_eq!(s, StatPair { init: 10, cur: 10 });
    }

    #[test]
    fn modify_clamps_to_init() {
        let mut s = StatPair::rolled(8);
        assert_eq!(s.modify(5), 8);
    }

    #[test]
    fn modify_clamps_to_zero() {
        let mut s = StatPair::rolled(8);
        assert_eq!(s.modify(-20), 0);
        assert!(s.is_depleted());
    }

    #[test]
    fn modify_survives_extreme_deltas() {
        let mut s = StatPair::rolled(12);
        assert_eq!(s.modify(i32::MIN), 0);
        assert_eq!(s.modify(i32::MAX), 12);
    }

    #[test]
    fn zeroed_pair_stays_zero() {
        let mut s = StatPair::default();
        assert_eq!(s.modify(3), 0);
    }

    #[test]
    fn normalize_repairs_bad_data() {
        let mut s = StatPair { init: 7, cur: 11 };
        s.normalize();
        assert_eq!(s.cur, 7);
        let mut s = StatPair { init: -2, cur: -1 };
        s.normalize();
        assert_eq!(s, StatPair { init: 0, cur: 0 });
    }

    #[test]
    fn display() {
        let mut s = StatPair::rolled(20);
        s.modify(-4);
        insta::assert_snapshot!(s.to_string(), @"16/20");
    }

    #[test]
    fn parse_stat_names() {
        assert_eq!("Skill".parse::<Stat>().unwrap(), Stat::Skill);
        assert_eq!("endurance".parse::<Stat>().unwrap(), Stat::Stamina);
        assert_eq!("LUCK".parse::<Stat>().unwrap(), Stat::Luck);
        assert!("charisma".parse::<Stat>().is_err());
    }

    proptest! {
        #[test]
        fn cur_stays_within_bounds(init in 0i32..30, deltas in proptest::collection::vec(any::<i32>(), 0..40)) {
            let mut s = StatPair::rolled(init);
            for d in deltas {
                s.modify(d);
                prop_assert!(s.cur >= 0);
                prop_assert!(s.cur <= s.init);
                prop_assert_eq!(s.init, init);
            }
        }
    }
}
