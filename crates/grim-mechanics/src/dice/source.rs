//! Concrete die sources.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::DieSource;
use crate::error::{MechError, MechResult};

/// Fair dice backed by a standard RNG.
#[derive(Debug, Clone)]
pub struct RandomDie {
    rng: StdRng,
}

impl RandomDie {
    /// Dice seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible dice for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DieSource for RandomDie {
    fn roll(&mut self, sides: u32) -> u32 {
        self.rng.random_range(1..=sides.max(1))
    }
}

/// Replays a fixed sequence of values, wrapping around at the end.
///
/// Values are clamped into `1..=sides` for the die being rolled.
#[derive(Debug, Clone)]
pub struct ScriptedDie {
    values: Vec<u32>,
    next: usize,
    rolled: usize,
}

impl ScriptedDie {
    /// Build a scripted die. Fails on an empty sequence.
    pub fn new(values: impl IntoIterator<Item = u32>) -> MechResult<Self> {
        let values: Vec<u32> = values.into_iter().collect();
        if values.is_empty() {
            return Err(MechError::EmptyScript);
        }
        Ok(Self {
            values,
            next: 0,
            rolled: 0,
        })
    }

    /// How many dice have been rolled so far.
    pub fn rolls_made(&self) -> usize {
        self.rolled
    }
}

impl DieSource for ScriptedDie {
    fn roll(&mut self, sides: u32) -> u32 {
        let value = self.values[self.next % self.values.len()];
        self.next = (self.next + 1) % self.values.len();
        self.rolled += 1;
        value.clamp(1, sides.max(1))
    }
}
