//! Roll sources driving probabilistic transitions
//!
//! Every lead draws one uniform roll in [0, 100) per tick. The source is
//! injectable so tests can script exact outcomes while production keeps
//! true randomness.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Supplies one roll per lead per tick, uniform in [0, 100)
pub trait RollSource {
    fn roll(&mut self) -> f64;
}

/// Production source backed by the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRolls;

impl RollSource for ThreadRolls {
    fn roll(&mut self) -> f64 {
        rand::thread_rng().gen_range(0.0..100.0)
    }
}

/// Deterministic source for reproducible runs (`--seed`)
#[derive(Debug, Clone)]
pub struct SeededRolls {
    rng: ChaCha8Rng,
}

impl SeededRolls {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RollSource for SeededRolls {
    fn roll(&mut self) -> f64 {
        self.rng.gen_range(0.0..100.0)
    }
}

/// Scripted source cycling through a fixed sequence
///
/// Used by tests to force specific branches. The sequence must be
/// non-empty.
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    rolls: Vec<f64>,
    next: usize,
}

impl ScriptedRolls {
    pub fn cycle(rolls: Vec<f64>) -> Self {
        assert!(!rolls.is_empty(), "scripted roll sequence must be non-empty");
        Self { rolls, next: 0 }
    }

    /// Every roll is the same value
    pub fn repeat(roll: f64) -> Self {
        Self::cycle(vec![roll])
    }
}

impl RollSource for ScriptedRolls {
    fn roll(&mut self) -> f64 {
        let roll = self.rolls[self.next];
        self.next = (self.next + 1) % self.rolls.len();
        roll
    }
}
