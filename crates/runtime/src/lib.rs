//! Monster decision runtime for a grid dungeon.
//!
//! Each tick the [`Dispatcher`] receives a read-only [`game_core::GameSnapshot`],
//! decides every controlled monster and produces one
//! [`game_core::CommandBatch`]. Decisions are pure CPU work; the batch is
//! handed to a [`CommandSink`] that owns any network delivery.
//!
//! Modules are organized by responsibility:
//! - [`dispatcher`] hosts the per-tick orchestration
//! - [`providers`] holds the scored monster AI
//! - [`memory`] keeps the double-buffered tick-to-tick bot memory
//! - [`api`] exposes errors and the command sink abstraction
//! - [`utils`] provides deterministic per-decision seeding
pub mod api;
pub mod dispatcher;
pub mod memory;
pub mod providers;
pub mod utils;

pub use api::{ChannelSink, CommandSink, NullSink, Result, RuntimeError};
pub use dispatcher::{Dispatcher, locate};
pub use memory::{BotMemory, DecisionState, MemorySlot, MemoryStore};
pub use providers::ai::{
    AiContext, Behavior, BehaviorRegistry, Decision, DistanceField, MonsterAi, SkillResult,
    SkillSelector,
};
pub use utils::{compute_seed, hash_id};
