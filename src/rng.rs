use bevy::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng as _, SeedableRng};

/// Seedable random source shared by spawning, layout and behavior re-rolls.
#[derive(Resource)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    /// Uniform in `[0, 1)`.
    pub fn float(&mut self) -> f32 {
        self.0.gen()
    }

    /// Uniform in `[min, max)`; returns `min` for an empty range.
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.0.gen_range(min..max)
    }

    /// Uniform in `[min, max]`.
    pub fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.0.gen_range(min..=max)
    }

    pub fn chance(&mut self, probability: f32) -> bool {
        self.float() < probability
    }
}
