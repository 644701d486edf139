//! Deterministic per-decision seeds.
//!
//! Every monster decision gets its own RNG, seeded from the engine seed, the
//! tick, the monster's identity and its level. Decisions therefore replay
//! exactly for the same snapshot and seed, whatever order they run in.

use std::hash::{DefaultHasher, Hash, Hasher};

use game_core::{ActorId, Tick};

/// Mixes the inputs of one decision into a 64-bit seed.
///
/// # Arguments
///
/// * `engine_seed` - Seed from the engine configuration
/// * `tick` - Current tick
/// * `actor` - Hash of the monster id (see [`hash_id`])
/// * `level` - Level the monster is on
pub fn compute_seed(engine_seed: u64, tick: Tick, actor: u64, level: i32) -> u64 {
    // SplitMix64 / FxHash multipliers
    let mut hash = engine_seed;
    hash ^= tick.0.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= actor.wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(level as u32).wrapping_mul(0x85ebca6b);

    // Final avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Stable 64-bit hash of a monster id.
pub fn hash_id(id: &ActorId) -> u64 {
    let mut hasher = DefaultHasher::new();
    id.as_str().hash(&mut hasher);
    hasher.finish()
}
