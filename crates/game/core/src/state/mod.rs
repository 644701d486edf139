//! Snapshot data model: identities, positions, actors, tiles and levels.
//!
//! Everything here is read-only during a tick. The AI borrows from the
//! snapshot and never mutates it.
pub mod actor;
pub mod common;
pub mod target;
pub mod world;

pub use actor::{Actor, Monster, Player, StunState};
pub use common::{ActorId, Position, Tick};
pub use target::Target;
pub use world::{GameSnapshot, LevelMap, Tile, TileFlags};
