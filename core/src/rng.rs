//! Deterministic pseudo-random engine shared by every generating system.
//!
//! The engine is a pure function of a single 32-bit state word. Each draw
//! advances the state by a fixed odd constant and mixes it with two
//! xorshift-multiply rounds, so two engines seeded alike always produce
//! bit-identical streams. Systems receive the engine by `&mut` reference and
//! must consume draws in a fixed order; that ordering is part of the
//! reproducibility contract of every generated dataset.

use std::f64::consts::TAU;

/// Seed used when a caller does not supply one.
pub const DEFAULT_SEED: u32 = 12_345;

const STATE_INCREMENT: u32 = 0x6d2b_79f5;
const UNIT_SCALE: f64 = 4_294_967_296.0;
/// Smallest non-zero value the engine can produce; replaces an exact zero
/// before taking a logarithm.
const MIN_UNIFORM: f64 = 1.0 / UNIT_SCALE;

/// Seeded 32-bit bit generator with a Gaussian transform layered on top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Creates an engine whose first draw is derived from `seed`.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current internal state; advancing a copy reproduces the remaining stream.
    #[must_use]
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Advances the state and returns the next mixed 32-bit word.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(STATE_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Draws a uniform value in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / UNIT_SCALE
    }

    /// Draws a uniform value in `[min, max)`.
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_unit() * (max - min)
    }

    /// Draws a normally distributed value using the Box-Muller transform.
    ///
    /// Consumes exactly two uniform draws, in order.
    pub fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_unit();
        let u2 = self.next_unit();
        standard_normal(u1, u2) * std_dev + mean
    }

    /// Picks an index proportionally to `weights`, consuming one draw.
    ///
    /// A single draw is scaled by the weight total and the weights are
    /// subtracted in order until the remainder drops to zero or below. When
    /// rounding leaves a positive remainder after the full pass the first
    /// index is returned. Returns `None` only for an empty slice.
    pub fn weighted_index(&mut self, weights: &[f64]) -> Option<usize> {
        if weights.is_empty() {
            return None;
        }

        let total: f64 = weights.iter().sum();
        let mut remainder = self.next_unit() * total;
        for (index, weight) in weights.iter().enumerate() {
            remainder -= weight;
            if remainder <= 0.0 {
                return Some(index);
            }
        }
        Some(0)
    }

    /// Picks an index uniformly from `0..len`, consuming one draw.
    pub fn uniform_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let index = (self.next_unit() * len as f64) as usize;
        Some(index.min(len - 1))
    }
}

fn standard_normal(u1: f64, u2: f64) -> f64 {
    let u1 = u1.max(MIN_UNIFORM);
    let radius = (-2.0 * u1.ln()).sqrt();
    radius * (TAU * u2).cos()
}

impl Default for Mulberry32 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
