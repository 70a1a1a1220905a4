//! Random number sources for the stochastic parts of the simulation.
//!
//! Every random branch in the decision engine (detour roll, patrol bias roll,
//! random neighbor pick) and in skill-check scheduling draws from a
//! [`RandomSource`]. The trait keeps the engine independent of a concrete
//! generator so tests can replay exact sequences.
//!
//! # Determinism
//!
//! [`SeededRandom`] produces the same sequence for the same seed, which makes
//! whole sessions reproducible from a single `u64`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniformly distributed random values.
pub trait RandomSource {
    /// Returns a uniform value in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// Returns a uniform index in `[0, len)`.
    ///
    /// `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        let scaled = (self.next_f32() * len as f32) as usize;
        scaled.min(len.saturating_sub(1))
    }

    /// Returns a uniform value in `[min, max)`, or `min` for an empty range.
    fn range(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        min + (max - min) * self.next_f32()
    }
}

/// ChaCha8-backed generator seeded from a `u64`.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
    seed: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this generator was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_f32(&mut self) -> f32 {
        self.rng.r#gen::<f32>()
    }

    fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len.max(1))
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Useful for pinning down individual branches of the decision engine.
/// An empty script always yields `0.0`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
