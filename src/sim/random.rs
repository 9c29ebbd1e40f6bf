//! Randomness source used for spawn positions and velocities

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform float source
pub trait RandomSource {
    /// Uniform float in `[min, max)`. Returns `min` for an empty range.
    fn float_range(&mut self, min: f32, max: f32) -> f32;

    /// Uniform float in `[0, max)`
    fn float_below(&mut self, max: f32) -> f32 {
        self.float_range(0.0, max)
    }
}

impl RandomSource for Pcg32 {
    fn float_range(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.random_range(min..max)
        } else {
            min
        }
    }
}

/// Seeded generator for a session
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}
