//! Deterministic seed derivation. Every stage and segment gets its own
//! ChaCha stream so results do not depend on evaluation order.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const SALT_PATH: u64 = 0x9A7B_CAFE_0001;
pub const SALT_DEPTH: u64 = 0xDE97_CAFE_0002;
pub const SALT_CURRENT: u64 = 0xC0AA_CAFE_0003;

#[inline]
pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

#[inline]
pub fn derive_seed(seed: u64, salt: u64, index: u64) -> u64 {
    splitmix64(splitmix64(seed ^ salt) ^ index)
}

/// Seeded generator for one (stage, index) pair.
pub fn stream(seed: u64, salt: u64, index: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_seed(seed, salt, index))
}
