//! Combat estimation.
//!
//! Pure functions predicting the outcome of a hit. Nothing here mutates
//! state; the server owns combat resolution.

pub mod damage;

pub use damage::{DAMAGE_VARIANCE, DamageType, MIN_RESISTANCE, damage_against, raw_damage, vary};
