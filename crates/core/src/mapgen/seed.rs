//! Deterministic seed mixing and bounded draws for dungeon generation.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub(super) fn dungeon_rng(run_seed: u64, generation_index: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_dungeon_seed(run_seed, generation_index))
}

pub(super) fn derive_dungeon_seed(run_seed: u64, generation_index: u64) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= generation_index.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}

/// Uniform draw from `0..upper`. `upper` must be non-zero.
pub(super) fn roll_below(rng: &mut ChaCha8Rng, upper: usize) -> usize {
    debug_assert!(upper > 0);
    (rng.next_u64() % upper as u64) as usize
}

pub(super) fn roll_chance(rng: &mut ChaCha8Rng, probability: f64) -> bool {
    let unit = (rng.next_u64() >> 11) as f64 / (1_u64 << 53) as f64;
    unit < probability
}

pub(super) fn pick<T: Copy>(rng: &mut ChaCha8Rng, values: &[T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    Some(values[roll_below(rng, values.len())])
}
