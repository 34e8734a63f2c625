// --- File: random.rs ---
// Injectable source of uniform draws for the stochastic gates.

use crate::utils::clamp_probability;
use rand::Rng;
use rand::rngs::StdRng;
use std::collections::VecDeque;

pub type SimRng = StdRng;

pub trait RandomSource {
    /// Next independent draw in `[0, 1)`.
    fn next_unit(&mut self) -> f32;

    /// One Bernoulli trial against `probability` (clamped into `[0, 1]` first).
    fn chance(&mut self, probability: f32) -> bool {
        self.next_unit() < clamp_probability(probability)
    }
}

impl RandomSource for StdRng {
    #[inline]
    fn next_unit(&mut self) -> f32 {
        self.r#gen::<f32>()
    }
}

/// Replays a fixed sequence of draws, then repeats `fallback` forever.
#[derive(Debug, Clone)]
pub struct ScriptedDraws {
    queue: VecDeque<f32>,
    fallback: f32,
}

impl ScriptedDraws {
    pub fn new(draws: impl IntoIterator<Item = f32>, fallback: f32) -> Self {
        Self {
            queue: draws.into_iter().collect(),
            fallback,
        }
    }

    /// Every draw returns `value`. `0.0` passes every non-zero gate, `1.0` fails them all.
    pub fn constant(value: f32) -> Self {
        Self::new([], value)
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl RandomSource for ScriptedDraws {
    fn next_unit(&mut self) -> f32 {
        self.queue.pop_front().unwrap_or(self.fallback)
    }
}

// --- End of File: random.rs ---
