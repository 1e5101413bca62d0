//! Random source for dice rolls and random choices.
//!
//! The engine never touches a global RNG. Everything random goes through the
//! [`Dice`] trait so a round can be replayed from a seed, or driven by a fixed
//! script of rolls in tests.

use std::collections::VecDeque;

use crate::constants::DICE_SIDES;

/// Supplier of dice rolls and uniform index choices.
pub trait Dice {
    /// Roll the die, returning a value in `1..=6`.
    fn roll(&mut self) -> u32;

    /// Pick an index in `0..bound` uniformly. `bound` must be non-zero.
    fn pick(&mut self, bound: usize) -> usize;
}

/// Dice backed by a fast, seedable PRNG.
#[derive(Clone, Debug)]
pub struct FastDice {
    rng: fastrand::Rng,
}

impl Default for FastDice {
    fn default() -> Self {
        Self::new()
    }
}

impl FastDice {
    /// Dice seeded from system entropy.
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Dice producing the same sequence for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Seed for round `round` of a run started from `base`.
    ///
    /// Rounds get independent streams so they can run on any thread in any
    /// order and still reproduce the same results.
    pub fn round_seed(base: u64, round: u64) -> u64 {
        base ^ round.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}

impl Dice for FastDice {
    #[inline]
    fn roll(&mut self) -> u32 {
        self.rng.u32(1..=DICE_SIDES)
    }

    #[inline]
    fn pick(&mut self, bound: usize) -> usize {
        self.rng.usize(..bound)
    }
}

/// Dice that play back a fixed list of rolls and picks.
///
/// Picks default to `0` (the first candidate) once the pick script runs out.
/// Running out of rolls is a bug in the caller's script and panics.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<u32>,
    picks: VecDeque<usize>,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            picks: VecDeque::new(),
        }
    }

    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks = picks.into_iter().collect();
        self
    }

    /// Rolls not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> u32 {
        match self.rolls.pop_front() {
            Some(value) => value,
            None => panic!("scripted dice ran out of rolls"),
        }
    }

    fn pick(&mut self, bound: usize) -> usize {
        self.picks.pop_front().unwrap_or(0).min(bound - 1)
    }
}
