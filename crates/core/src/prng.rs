//! Deterministic PRNG for particle respawns.
//!
//! Xorshift64 with the standard (13, 7, 17) shift parameters: fast, seedable,
//! and identical across platforms, so a seeded run replays the exact same
//! respawn positions frame for frame.

use crate::context::SurfaceSize;
use glam::DVec2;

/// Xorshift64 generator. Same seed, same sequence.
#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Replacement for seed 0, which is the all-zeros fixed point of the
    /// xorshift algorithm.
    const FALLBACK_SEED: u64 = 0xF10A_F1E1_D5EE_D001;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in [0, 1), using the top 53 bits for full mantissa
    /// precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform position in `[0, width) × [0, height)` — the respawn draw.
    pub fn next_point_in(&mut self, surface: SurfaceSize) -> DVec2 {
        DVec2::new(
            self.next_range(0.0, surface.width()),
            self.next_range(0.0, surface.height()),
        )
    }
}
