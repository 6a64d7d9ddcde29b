//! Seedable Xorshift64 generator used for scattering initial particle positions.
//!
//! The field must look random on every session, yet tests need exact replays,
//! so the generator is explicit and seedable instead of a thread-local source.

use glam::DVec2;

/// Xorshift64 PRNG with shifts (13, 7, 17).
///
/// Seed 0 is a fixed point of the algorithm and is replaced by a non-zero
/// fallback.
#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in [0, 1) built from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform point in `[0, width) x [0, height)`, x drawn before y.
    pub fn next_point_in(&mut self, width: f64, height: f64) -> DVec2 {
        let x = self.next_range(0.0, width);
        let y = self.next_range(0.0, height);
        DVec2::new(x, y)
    }
}
