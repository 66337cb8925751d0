//! Uniform random draws for the simulation
//!
//! The core only ever needs values in `[0, 1)`. Production runs use a seeded
//! `Pcg32`; tests and replays feed a fixed sequence.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform draws in `[0, 1)`
pub trait UnitSource {
    fn next_unit(&mut self) -> f32;
}

impl UnitSource for Pcg32 {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Seeded RNG for a session
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed sequence of draws, then a fallback value forever
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    draws: VecDeque<f32>,
    fallback: f32,
}

impl ScriptedDraws {
    pub fn new(draws: impl IntoIterator<Item = f32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback: 0.0,
        }
    }

    /// Value returned once the scripted draws run out
    pub fn with_fallback(mut self, fallback: f32) -> Self {
        self.fallback = fallback;
        self
    }

    /// Append more draws to the end of the script
    pub fn extend(&mut self, draws: impl IntoIterator<Item = f32>) {
        self.draws.extend(draws);
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl UnitSource for ScriptedDraws {
    fn next_unit(&mut self) -> f32 {
        // Clamp into [0, 1) so a bad script can't push objects off-canvas
        let v = self.draws.pop_front().unwrap_or(self.fallback);
        v.clamp(0.0, 1.0 - f32::EPSILON)
    }
}
