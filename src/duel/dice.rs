//! Random rolls behind a seam
//!
//! Damage, healing, and policy choices all draw from a `Dice` implementation
//! so combat is reproducible: the arena is constructed with an explicit seed,
//! and tests script exact rolls.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of integer rolls for combat and games
pub trait Dice: Send {
    /// Uniform roll in `[lo, hi]` inclusive
    fn roll(&mut self, lo: i32, hi: i32) -> i32;

    /// Uniform pick of one slot out of `n`
    fn pick(&mut self, n: usize) -> usize;
}

/// ChaCha8-backed dice with an explicit seed
#[derive(Debug)]
pub struct SeededDice {
    rng: ChaCha8Rng,
}

impl SeededDice {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Dice for SeededDice {
    fn roll(&mut self, lo: i32, hi: i32) -> i32 {
        self.rng.gen_range(lo..=hi)
    }

    fn pick(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }
}

/// Dice that replay a fixed script of values
///
/// `roll` and `pick` consume from the same queue in call order. An exhausted
/// script yields the range minimum, which keeps scenario tests short.
#[derive(Debug, Default)]
pub struct ScriptedDice {
    script: VecDeque<i32>,
}

impl ScriptedDice {
    pub fn new(values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            script: values.into_iter().collect(),
        }
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, lo: i32, hi: i32) -> i32 {
        match self.script.pop_front() {
            Some(value) => value.clamp(lo, hi),
            None => lo,
        }
    }

    fn pick(&mut self, n: usize) -> usize {
        match self.script.pop_front() {
            Some(value) => (value.max(0) as usize).min(n.saturating_sub(1)),
            None => 0,
        }
    }
}
