//! Players and monsters as seen in a tick snapshot.

use crate::action::Skill;
use crate::state::ActorId;
use crate::stats::Attributes;
use crate::traits::Faction;

/// Stun status reported by the server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct StunState {
    pub is_stunned: bool,
    /// Stun effects have no effect on this actor.
    pub is_immune: bool,
}

/// Fields shared by every player and monster.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub faction: Faction,
    pub attributes: Attributes,
    pub max_attributes: Attributes,
    pub stun: StunState,
}

impl Actor {
    pub fn is_alive(&self) -> bool {
        self.attributes.life > 0.0
    }

    pub fn is_stunned(&self) -> bool {
        self.stun.is_stunned
    }
}

/// A monster under AI control.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Monster {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub actor: Actor,
    /// Skills granted by equipped items.
    pub skills: Vec<Skill>,
    /// Behaviour profile tag; see the runtime presets.
    pub algorithm: String,
    /// Ticks since this monster last took damage.
    ///
    /// Defaults to [`Monster::NEVER_HURT`] when the snapshot omits it, so an
    /// unreported monster counts as out of combat.
    pub last_damage_taken: u32,
}

impl Default for Monster {
    fn default() -> Self {
        Self {
            actor: Actor::default(),
            skills: Vec::new(),
            algorithm: String::new(),
            last_damage_taken: Self::NEVER_HURT,
        }
    }
}

impl Monster {
    /// `last_damage_taken` of a monster with no recorded damage.
    pub const NEVER_HURT: u32 = u32::MAX;

    pub fn id(&self) -> &ActorId {
        &self.actor.id
    }
}

/// A player character. Players are never controlled, only observed.
pub type Player = Actor;
