//! Skills and their effects.
//!
//! Every numeric field of a skill is an attribute template evaluated against
//! the caster (see [`Attributes::weighted_value`]). Templates missing from the
//! wire default to zero, so scoring code never has to null-check.

use std::collections::BTreeMap;

use bitflags::bitflags;

use crate::combat::DamageType;
use crate::stats::{AttributeKind, Attributes};

/// What a skill is aimed at.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SkillTarget {
    /// Self-cast; evaluated once against the caster.
    #[default]
    None,
    /// A tile, occupied or not.
    Position,
    /// A player or monster.
    Character,
}

bitflags! {
    /// Flags on either side of a skill (caster effect or target effect).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EffectFlags: u8 {
        /// The caster moves to the target position.
        const MOVEMENT      = 1 << 0;
        /// Affects every occupant around the caster instead of the target.
        const GROUND_EFFECT = 1 << 1;
        const STUN          = 1 << 2;
        const KNOCKBACK     = 1 << 3;
    }
}

bitflags! {
    /// Casting restrictions of a skill.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SkillFlags: u8 {
        const REQUIRES_LINE_OF_SIGHT = 1 << 0;
        const REQUIRES_OUT_OF_COMBAT = 1 << 1;
        /// Always-on; never cast.
        const PASSIVE                = 1 << 2;
    }
}

/// Creature a skill brings into play.
///
/// Only the count matters for scoring.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Summon {
    pub name: String,
}

/// Per-stat delta templates of an effect.
///
/// Each affected stat carries its own template, so a heal can scale with the
/// caster's intelligence while a drain scales with willpower. Stats without
/// an entry are left unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkillAttributes(BTreeMap<AttributeKind, Attributes>);

impl SkillAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, kind: AttributeKind, template: Attributes) -> Self {
        self.0.insert(kind, template);
        self
    }

    pub fn template(&self, kind: AttributeKind) -> Option<&Attributes> {
        self.0.get(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolves every template against `caster` into a plain delta vector.
    pub fn resolve(&self, caster: &Attributes) -> Attributes {
        self.0
            .iter()
            .fold(Attributes::ZERO, |delta, (&kind, template)| {
                delta.with(kind, caster.weighted_value(template))
            })
    }
}

/// One side of a skill: attribute deltas, flags and summons.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillEffect {
    /// Deltas applied to each affected actor.
    pub attributes: SkillAttributes,
    pub flags: EffectFlags,
    pub summons: Vec<Summon>,
}

impl SkillEffect {
    pub fn with_flags(flags: EffectFlags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }
}

/// A castable skill with all of its templates.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub target: SkillTarget,
    pub range: Attributes,
    pub radius: Attributes,
    pub duration: Attributes,
    pub cost: Attributes,
    pub damage_amount: Attributes,
    pub damage_type: DamageType,
    pub caster_effects: SkillEffect,
    pub target_effects: SkillEffect,
    pub flags: SkillFlags,
}

impl Skill {
    /// Identifier and name of the synthetic movement skill.
    pub const DEFAULT_MOVE_ID: &'static str = "DEFAULT_MOVE";

    /// The always-available one-tile step.
    ///
    /// Free, range 1, position-targeted and flagged as movement so plain
    /// walking competes with real skills in the same scoring pass.
    pub fn default_move() -> Self {
        Self {
            id: Self::DEFAULT_MOVE_ID.to_owned(),
            name: Self::DEFAULT_MOVE_ID.to_owned(),
            target: SkillTarget::Position,
            range: Attributes::constant(1.0),
            caster_effects: SkillEffect::with_flags(EffectFlags::MOVEMENT),
            ..Self::default()
        }
    }

    pub fn is_default_move(&self) -> bool {
        self.id == Self::DEFAULT_MOVE_ID
    }

    pub fn is_passive(&self) -> bool {
        self.flags.contains(SkillFlags::PASSIVE)
    }

    pub fn requires_line_of_sight(&self) -> bool {
        self.flags.contains(SkillFlags::REQUIRES_LINE_OF_SIGHT)
    }

    pub fn requires_out_of_combat(&self) -> bool {
        self.flags.contains(SkillFlags::REQUIRES_OUT_OF_COMBAT)
    }

    pub fn is_movement(&self) -> bool {
        self.caster_effects.flags.contains(EffectFlags::MOVEMENT)
    }

    pub fn is_ground_effect(&self) -> bool {
        self.caster_effects.flags.contains(EffectFlags::GROUND_EFFECT)
    }
}
