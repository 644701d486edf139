//! Data-driven inputs for the monster AI.
//!
//! This crate reads the files the decision engine is configured and fed with:
//! - Engine configuration (TOML)
//! - Behaviour profiles keyed by algorithm tag (RON)
//! - Recorded tick snapshots (JSON)
//!
//! All loaders use game-core types directly with serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, ProfileLoader, SnapshotLoader};
