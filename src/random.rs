//! Injected randomness.
//!
//! Every draw the battle core makes goes through [`RandomSource`], so a seeded
//! [`SmallRng`] reproduces a battle exactly and [`ScriptedRandom`] lets tests
//! pin individual rolls.

use rand::rngs::SmallRng;
use rand::Rng;
use std::collections::VecDeque;

pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    fn chance(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }

    /// Uniform integer in `[0, upper)`; `upper == 0` yields 0.
    fn below(&mut self, upper: u32) -> u32 {
        if upper == 0 {
            return 0;
        }
        let roll = (self.next_unit() * upper as f64) as u32;
        roll.min(upper - 1)
    }

    fn range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        low + self.below(high - low + 1)
    }
}

impl RandomSource for SmallRng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of unit values, then repeats `fallback` forever.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    values: VecDeque<f64>,
    fallback: f64,
    draws: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback: 0.5,
            draws: 0,
        }
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback.clamp(0.0, 0.999_999);
        self
    }

    /// Number of values handed out so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        self.draws += 1;
        self.values
            .pop_front()
            .unwrap_or(self.fallback)
            .clamp(0.0, 0.999_999)
    }
}
