//! Deterministic RNG resource for appearance generation.
//!
//! Every random draw made while placing buildings (shape variant, per-cell
//! block variant) goes through `ResMut<TownRng>` so identical seeds and
//! identical command streams produce identical towns.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Default seed used when no explicit seed is provided.
const DEFAULT_SEED: u64 = 42;

#[derive(Resource)]
pub struct TownRng(pub ChaCha8Rng);

impl Default for TownRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(DEFAULT_SEED))
    }
}

impl TownRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = TownRng::from_seed(7);
        let mut b = TownRng::from_seed(7);
        let xs: Vec<u32> = (0..16).map(|_| a.0.gen()).collect();
        let ys: Vec<u32> = (0..16).map(|_| b.0.gen()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn default_uses_fixed_seed() {
        let mut a = TownRng::default();
        let mut b = TownRng::from_seed(DEFAULT_SEED);
        assert_eq!(a.0.gen::<u64>(), b.0.gen::<u64>());
    }
}
