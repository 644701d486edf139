//! AI context for one monster's decision.
//!
//! The [`AiContext`] is the "blackboard" shared by every stage of the
//! decision pipeline. It provides:
//!
//! - The deciding monster and its tile
//! - The distance/visibility field computed for this tick
//! - The scoring weights and engine parameters
//! - Read-only views of the monster's memory (carried and previous)
//! - Cached lists of visible hostiles and friendlies

use game_core::{
    Actor, Alignment, BotConfig, EngineConfig, LevelMap, Monster, Position, Target, Tile,
    stats,
};

use crate::memory::BotMemory;
use crate::providers::ai::field::DistanceField;

/// A visible actor with its position.
#[derive(Clone, Copy, Debug)]
pub struct Sighting<'a> {
    pub actor: &'a Actor,
    pub position: Position,
    pub is_monster: bool,
}

/// Context for one monster's decision in one tick.
///
/// # Lifetime
///
/// The `'a` lifetime ties the context to the tick snapshot and the memory
/// slot it was built from. Decisions are synchronous, so the context never
/// outlives either.
pub struct AiContext<'a> {
    /// The monster making the decision.
    pub monster: &'a Monster,

    /// Tile the monster stands on.
    pub position: Position,

    /// BFS distance and line of sight from `position`.
    pub field: DistanceField<'a>,

    /// Scoring weights resolved from the monster's algorithm tag.
    pub config: BotConfig,

    pub engine: &'a EngineConfig,

    /// Memory carried into this tick (already aged).
    pub memory: &'a BotMemory,

    /// Memory as committed one tick earlier.
    pub previous: &'a BotMemory,

    hostiles: Vec<Sighting<'a>>,
    friendlies: Vec<Sighting<'a>>,
}

impl<'a> AiContext<'a> {
    /// Builds the context, computing the field and the visible actor lists.
    ///
    /// # Arguments
    ///
    /// * `level` - Level the monster is on
    /// * `position` - The monster's tile
    /// * `monster` - The deciding monster
    /// * `config` - Scoring weights for this monster
    /// * `engine` - Engine-wide parameters
    /// * `memory` - Aged memory carried into this tick
    /// * `previous` - Memory committed on the previous tick
    pub fn new(
        level: &'a LevelMap,
        position: Position,
        monster: &'a Monster,
        config: BotConfig,
        engine: &'a EngineConfig,
        memory: &'a BotMemory,
        previous: &'a BotMemory,
    ) -> Self {
        let field = DistanceField::compute(level, position);
        let mut hostiles = Vec::new();
        let mut friendlies = Vec::new();

        for (_, entry) in field.reachable() {
            if !entry.line_of_sight {
                continue;
            }
            let Some(tile) = entry.tile else { continue };

            for sighting in sightings(tile) {
                if sighting.actor.id == monster.actor.id || !sighting.actor.is_alive() {
                    continue;
                }
                match monster.actor.faction.alignment_of(sighting.actor.faction) {
                    Alignment::Hostile => hostiles.push(sighting),
                    Alignment::Friendly => friendlies.push(sighting),
                    Alignment::Neutral => {}
                }
            }
        }

        Self {
            monster,
            position,
            field,
            config,
            engine,
            memory,
            previous,
            hostiles,
            friendlies,
        }
    }

    pub fn caster(&self) -> &'a Actor {
        &self.monster.actor
    }

    pub fn level(&self) -> &'a LevelMap {
        self.field.level()
    }

    /// The caster as a skill target.
    pub fn self_target(&self) -> Target<'a> {
        Target::Monster {
            monster: self.monster,
            position: self.position,
        }
    }

    pub fn is_caster(&self, actor: &Actor) -> bool {
        actor.id == self.monster.actor.id
    }

    pub fn alignment_of(&self, actor: &Actor) -> Alignment {
        self.monster.actor.faction.alignment_of(actor.faction)
    }

    /// Visible living hostiles, nearest (by BFS) first.
    pub fn visible_hostiles(&self) -> &[Sighting<'a>] {
        &self.hostiles
    }

    /// Visible living friendlies other than the caster, nearest first.
    pub fn visible_friendlies(&self) -> &[Sighting<'a>] {
        &self.friendlies
    }

    /// Weighted resource fraction of the caster in `[0, 1]`.
    pub fn health(&self) -> f32 {
        let caster = self.caster();
        stats::health(&caster.attributes, &caster.max_attributes)
    }

    /// Every player and monster within Euclidean `radius` of `center`.
    ///
    /// Uses the level grid directly, so tiles the monster cannot reach are
    /// included. A negative radius is treated as zero.
    pub fn occupants_within(&self, center: Position, radius: i32) -> Vec<Target<'a>> {
        let radius = radius.max(0);
        let level = self.level();
        let mut targets = Vec::new();

        for y in center.y - radius..=center.y + radius {
            for x in center.x - radius..=center.x + radius {
                let pos = Position::new(x, y);
                if !level.in_bounds(pos) || pos.euclid_floor(center) > radius as u32 {
                    continue;
                }
                if let Some(tile) = level.tile(pos) {
                    targets.extend(occupants(tile));
                }
            }
        }

        targets
    }
}

fn sightings(tile: &Tile) -> impl Iterator<Item = Sighting<'_>> {
    let position = tile.position;
    let players = tile.players.iter().map(move |actor| Sighting {
        actor,
        position,
        is_monster: false,
    });
    let monsters = tile.monsters.iter().map(move |monster| Sighting {
        actor: &monster.actor,
        position,
        is_monster: true,
    });
    players.chain(monsters)
}

/// Occupants of `tile` as targets, players first.
pub(crate) fn occupants(tile: &Tile) -> impl Iterator<Item = Target<'_>> {
    let position = tile.position;
    let players = tile
        .players
        .iter()
        .map(move |player| Target::Player { player, position });
    let monsters = tile
        .monsters
        .iter()
        .map(move |monster| Target::Monster { monster, position });
    players.chain(monsters)
}
