//! Scored monster AI.
//!
//! One decision runs a fixed pipeline over a read-only level:
//!
//! 1. **Field**: BFS distance and line of sight from the monster's tile
//! 2. **Context**: the monster, its weights, visible friends and foes
//! 3. **Catalogs**: usable skills bucketed by range, targets bucketed by
//!    distance
//! 4. **Scoring**: every legal (skill, target) pair becomes a
//!    [`SkillResult`] and one scalar; the strictly highest wins
//! 5. **Command**: the winner becomes a move, a skill use, or nothing
//!
//! # Core Components
//!
//! - [`MonsterAi`]: per-monster entry point producing a [`Decision`]
//! - [`AiContext`]: shared view of the level for one monster
//! - [`DistanceField`]: BFS distances with memoised line-of-sight
//! - [`SkillSelector`]: best-pair search
//! - [`CommandBuilder`]: command construction and long-range move goals
//! - [`BehaviorRegistry`]: algorithm tag to scoring weights

pub mod catalog;
pub mod command;
pub mod context;
pub mod field;
pub mod presets;
pub mod provider;
pub mod scoring;
pub mod targets;

pub use catalog::{DEFAULT_MOVE, SkillCatalog};
pub use command::CommandBuilder;
pub use context::{AiContext, Sighting};
pub use field::{DistanceField, FieldEntry, UNREACHABLE};
pub use presets::{Behavior, BehaviorRegistry};
pub use provider::{Decision, MonsterAi, STUNNED_YELL};
pub use scoring::{Candidate, PartyScores, SkillResult, SkillSelector};
pub use targets::TargetCatalog;
