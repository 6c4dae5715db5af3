//! Randomness used by the defense simulator
//!
//! Every draw the simulator makes goes through [`RandomSource`] so tests
//! can script the outcome of a tick.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// The draws a simulator tick needs
pub trait RandomSource {
    /// Uniform in [0, 1)
    fn chance(&mut self) -> f64;
    /// Uniform in [0, upper)
    fn index(&mut self, upper: usize) -> usize;
    /// Strength jitter, uniform in [0, 10)
    fn jitter(&mut self) -> u32;
    /// One octet of a synthetic source address, uniform in [0, 255)
    fn octet(&mut self) -> u8;
}

/// Adapter over any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    /// Reproducible stream for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn chance(&mut self) -> f64 {
        self.0.gen::<f64>()
    }

    fn index(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        self.0.gen_range(0..upper)
    }

    fn jitter(&mut self) -> u32 {
        self.0.gen_range(0..10)
    }

    fn octet(&mut self) -> u8 {
        self.0.gen_range(0..255)
    }
}

/// A single scripted tick outcome
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Draw {
    Chance(f64),
    Index(usize),
    Jitter(u32),
    Octet(u8),
}

/// Replays queued draws in order. When the queue runs dry, or the next
/// draw is of a different kind, a neutral value is returned: chance 1.0
/// (never spawns), index 0, jitter 0, octet 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    draws: VecDeque<Draw>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, draw: Draw) -> &mut Self {
        self.draws.push_back(draw);
        self
    }

    /// Queue the draws for one spawned attack of the given kind index
    pub fn spawn(&mut self, kind_index: usize, jitter: u32, octets: [u8; 4]) -> &mut Self {
        self.push(Draw::Chance(0.0))
            .push(Draw::Index(kind_index))
            .push(Draw::Jitter(jitter));
        for octet in octets {
            self.push(Draw::Octet(octet));
        }
        self
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedSource {
    fn chance(&mut self) -> f64 {
        match self.draws.front() {
            Some(Draw::Chance(value)) => {
                let value = *value;
                self.draws.pop_front();
                value
            }
            _ => 1.0,
        }
    }

    fn index(&mut self, upper: usize) -> usize {
        match self.draws.front() {
            Some(Draw::Index(value)) => {
                let value = *value;
                self.draws.pop_front();
                value.min(upper.saturating_sub(1))
            }
            _ => 0,
        }
    }

    fn jitter(&mut self) -> u32 {
        match self.draws.front() {
            Some(Draw::Jitter(value)) => {
                let value = *value;
                self.draws.pop_front();
                value
            }
            _ => 0,
        }
    }

    fn octet(&mut self) -> u8 {
        match self.draws.front() {
            Some(Draw::Octet(value)) => {
                let value = *value;
                self.draws.pop_front();
                value
            }
            _ => 0,
        }
    }
}
