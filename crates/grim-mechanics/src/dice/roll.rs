//! Dice roll results and aggregation.

use std::fmt;

/// The values of a group of dice rolled together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roll {
    /// Individual die values in roll order.
    pub dice: Vec<u32>,
}

impl Roll {
    /// Sum of all die values.
    pub fn total(&self) -> u32 {
        self.dice.iter().sum()
    }

    /// Sum as a signed value, for adding to stats.
    pub fn signed_total(&self) -> i32 {
        i32::try_from(self.total()).unwrap_or(i32::MAX)
    }

    /// Number of dice in the roll.
    pub fn count(&self) -> usize {
        self.dice.len()
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.dice.iter().map(|d| d.to_string()).collect();
        write!(f, "[{}] = {}", values.join(", "), self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total() {
        let r = Roll { dice: vec![6, 5] };
        assert_eq!(r.total(), 11);
        assert_eq!(r.signed_total(), 11);
        assert_eq!(r.count(), 2);
    }

    #[test]
    fn empty_roll() {
        let r = Roll::default();
        assert_eq!(r.total(), 0);
        assert_eq!(r.count(), 0);
    }

    #[test]
    fn display() {
        let r = Roll { dice: vec![3, 4] };
        insta::assert_snapshot!(r.to_string(), @"[3, 4] = 7");
    }
}
