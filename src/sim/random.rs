//! Injected randomness for serves
//!
//! The serve direction is the only random decision in the simulation, so the
//! match takes its coin flips from a `ServeRandom` source instead of an
//! ambient generator. Production code uses a seeded `Pcg32`; tests can
//! script the exact sequence.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of fair coin flips for serve directions
pub trait ServeRandom {
    /// Returns `true` or `false` with equal probability
    fn coin_flip(&mut self) -> bool;

    /// A random direction sign, `1.0` or `-1.0`
    fn sign(&mut self) -> f32 {
        if self.coin_flip() { 1.0 } else { -1.0 }
    }
}

impl ServeRandom for Pcg32 {
    fn coin_flip(&mut self) -> bool {
        self.random_bool(0.5)
    }
}

/// Seeded production source
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed sequence of flips, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedCoin {
    flips: VecDeque<bool>,
}

impl ScriptedCoin {
    /// Returns `None` for an empty sequence
    pub fn new(flips: impl IntoIterator<Item = bool>) -> Option<Self> {
        let flips: VecDeque<bool> = flips.into_iter().collect();
        if flips.is_empty() {
            return None;
        }
        Some(Self { flips })
    }

    /// Always lands the same way
    pub fn constant(value: bool) -> Self {
        Self {
            flips: VecDeque::from([value]),
        }
    }
}

impl ServeRandom for ScriptedCoin {
    fn coin_flip(&mut self) -> bool {
        // Non-empty by construction
        let flip = self.flips.pop_front().unwrap_or(true);
        self.flips.push_back(flip);
        flip
    }
}
