//! Small helpers shared by the dispatcher.

pub mod seed;

pub use seed::{compute_seed, hash_id};
