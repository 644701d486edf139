//! Data model shared by the monster AI and its tools.
//!
//! `game-core` defines the per-tick snapshot (levels, tiles, actors), the
//! attribute model skills are expressed in, and the commands the AI emits.
//! Everything here is pure: no I/O, no randomness, no global state.
pub mod action;
pub mod combat;
pub mod config;
pub mod error;
pub mod state;
pub mod stats;
pub mod traits;

pub use action::{
    Command, CommandBatch, CommandKind, EffectFlags, Skill, SkillAttributes, SkillEffect,
    SkillFlags, SkillTarget, SkillUse, SkillUseTarget, Summon,
};
pub use combat::{DamageType, damage_against, raw_damage};
pub use config::{BotConfig, EngineConfig};
pub use error::{ErrorSeverity, GameError, RequirementError, SnapshotError};
pub use state::{
    Actor, ActorId, GameSnapshot, LevelMap, Monster, Player, Position, StunState, Target, Tick,
    Tile, TileFlags,
};
pub use stats::{AttributeKind, Attributes};
pub use traits::{Alignment, Faction};
