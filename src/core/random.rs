//! Deterministic random stream
//!
//! Park-Miller "minimal standard" Lehmer generator. Every derived value in a
//! dataset build is drawn from one of these, in a fixed traversal order, so
//! the same seed always reproduces the same dataset.

use crate::core::error::{GovError, Result};

/// Lehmer modulus (2^31 - 1)
pub const MODULUS: u64 = 2_147_483_647;

/// Lehmer multiplier
pub const MULTIPLIER: u64 = 16_807;

/// Source of uniform draws in [0, 1)
///
/// Generation code is written against this trait so tests can pin draws.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// `low + draw * width`, evaluated in exactly that order
    fn draw_in(&mut self, low: f64, width: f64) -> f64 {
        low + self.next_f64() * width
    }

    /// `floor(draw * len)`, for picking from a fixed table
    fn pick_index(&mut self, len: usize) -> usize {
        ((self.next_f64() * len as f64).floor() as usize).min(len.saturating_sub(1))
    }
}

/// Seeded Lehmer stream with a draw counter
#[derive(Debug, Clone)]
pub struct LehmerRandom {
    seed: u64,
    state: u64,
    draws: u64,
}

impl LehmerRandom {
    pub fn new(seed: u64) -> Result<Self> {
        if seed == 0 || seed >= MODULUS {
            return Err(GovError::InvalidSeed(seed));
        }
        Ok(Self {
            seed,
            state: seed,
            draws: 0,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of draws taken since construction or the last reseed
    pub fn cursor(&self) -> u64 {
        self.draws
    }

    /// Restart the stream from its seed
    pub fn reseed(&mut self) {
        self.state = self.seed;
        self.draws = 0;
    }
}

impl RandomSource for LehmerRandom {
    fn next_f64(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER) % MODULUS;
        self.draws += 1;
        (self.state - 1) as f64 / (MODULUS - 1) as f64
    }
}

/// Draws the same value forever
#[derive(Debug, Clone, Copy)]
pub struct ConstantRandom(pub f64);

impl RandomSource for ConstantRandom {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}
