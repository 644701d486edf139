//! Things a skill can be aimed at.

use crate::state::{Actor, ActorId, Monster, Player, Position, StunState};
use crate::stats::Attributes;
use crate::traits::Faction;

/// A player, a monster or an empty tile, each borrowed from the snapshot.
#[derive(Clone, Copy, Debug)]
pub enum Target<'a> {
    Player {
        player: &'a Player,
        position: Position,
    },
    Monster {
        monster: &'a Monster,
        position: Position,
    },
    Empty(Position),
}

impl<'a> Target<'a> {
    pub fn position(&self) -> Position {
        match *self {
            Target::Player { position, .. } | Target::Monster { position, .. } => position,
            Target::Empty(position) => position,
        }
    }

    /// The occupant, or `None` for an empty tile.
    pub fn actor(&self) -> Option<&'a Actor> {
        match *self {
            Target::Player { player, .. } => Some(player),
            Target::Monster { monster, .. } => Some(&monster.actor),
            Target::Empty(_) => None,
        }
    }

    pub fn id(&self) -> Option<&'a ActorId> {
        self.actor().map(|a| &a.id)
    }

    pub fn name(&self) -> &'a str {
        self.actor().map_or("<empty>", |a| a.name.as_str())
    }

    pub fn faction(&self) -> Option<Faction> {
        self.actor().map(|a| a.faction)
    }

    pub fn attributes(&self) -> Option<&'a Attributes> {
        self.actor().map(|a| &a.attributes)
    }

    pub fn max_attributes(&self) -> Option<&'a Attributes> {
        self.actor().map(|a| &a.max_attributes)
    }

    pub fn stun(&self) -> StunState {
        self.actor().map(|a| a.stun).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Target::Empty(_))
    }

    pub fn is_monster(&self) -> bool {
        matches!(self, Target::Monster { .. })
    }

    /// Returns true when this target is the actor `id`.
    pub fn is(&self, id: &ActorId) -> bool {
        self.id() == Some(id)
    }
}
