//! Die sources and rolls.
//!
//! Everything that needs randomness takes a [`DieSource`], so tests can
//! replay an exact sequence with [`ScriptedDie`] while the application uses
//! a seedable [`RandomDie`].

pub mod roll;
pub mod source;

pub use roll::Roll;
pub use source::{RandomDie, ScriptedDie};

/// Sides on the standard gamebook die.
pub const D6: u32 = 6;

/// A source of fair die rolls.
pub trait DieSource {
    /// Roll one die with `sides` faces, returning a value in `1..=sides`.
    fn roll(&mut self, sides: u32) -> u32;

    /// Roll one six-sided die.
    fn d6(&mut self) -> u32 {
        self.roll(D6)
    }

    /// Roll `count` dice with `sides` faces, in order.
    fn roll_many(&mut self, count: usize, sides: u32) -> Roll {
        Roll {
            dice: (0..count).map(|_| self.roll(sides)).collect(),
        }
    }
}

impl<T: DieSource + ?Sized> DieSource for &mut T {
    fn roll(&mut self, sides: u32) -> u32 {
        (**self).roll(sides)
    }
}

impl<T: DieSource + ?Sized> DieSource for Box<T> {
    fn roll(&mut self, sides: u32) -> u32 {
        (**self).roll(sides)
    }
}
