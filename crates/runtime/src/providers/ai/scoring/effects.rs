//! One skill effect applied to one actor.

use game_core::combat;
use game_core::{Actor, Alignment, EffectFlags, Skill, SkillEffect};
use rand::Rng;

use super::curves::{buffs_score, resists_score, vitals_delta};
use super::{PartyScores, SkillResult};

pub const STUN_HOSTILE_PENALTY: f32 = -0.2;
pub const STUN_FRIENDLY_PENALTY: f32 = -0.4;
pub const KNOCKBACK_HOSTILE_PENALTY: f32 = -0.1;
pub const KNOCKBACK_FRIENDLY_PENALTY: f32 = -0.2;

/// Friendly vitals credited per summoned creature.
pub const SUMMON_SCORE: f32 = 0.5;

/// Which half of a skill is being applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// The caster effect, which also pays the cost.
    Caster,
    /// The target effect, which also carries the damage.
    Target,
}

/// Which party of a [`SkillResult`] an affected actor counts towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Party {
    Caster,
    Friendly,
    Hostile,
}

/// Scores `skill`'s `side` effect on `actor`.
///
/// Templates are evaluated against the caster. Neutral actors are skipped
/// and produce the empty result.
///
/// # Arguments
///
/// * `caster` - The monster casting the skill
/// * `actor` - The affected actor (may be the caster)
/// * `skill` - The skill being scored
/// * `side` - Caster or target half of the skill
/// * `rng` - Source for the damage roll
pub fn apply_effect<R: Rng + ?Sized>(
    caster: &Actor,
    actor: &Actor,
    skill: &Skill,
    side: Side,
    rng: &mut R,
) -> SkillResult {
    let party = if actor.id == caster.id {
        Party::Caster
    } else {
        match caster.faction.alignment_of(actor.faction) {
            Alignment::Friendly => Party::Friendly,
            Alignment::Hostile => Party::Hostile,
            Alignment::Neutral => return SkillResult::EMPTY,
        }
    };

    let effect = match side {
        Side::Caster => &skill.caster_effects,
        Side::Target => &skill.target_effects,
    };

    let duration = caster.attributes.weighted_int(&skill.duration).max(1) as f32;
    let mut delta = effect.attributes.resolve(&caster.attributes) * duration;

    match side {
        Side::Caster => delta = delta - skill.cost,
        Side::Target if party != Party::Caster => {
            let power = caster.attributes.weighted_value(&skill.damage_amount);
            if power != 0.0 {
                let raw = combat::damage_against(power, skill.damage_type, &actor.attributes);
                let roll = rng.gen_range(-1.0..=1.0);
                delta.life -= combat::vary(raw, roll);
            }
        }
        Side::Target => {}
    }

    let mut scores = PartyScores {
        vitals: vitals_delta(&actor.attributes, &actor.max_attributes, &delta),
        buffs: buffs_score(&delta),
        resists: resists_score(&delta),
    };
    scores.vitals += control_penalty(effect, actor, party);

    let mut result = SkillResult::EMPTY;
    match party {
        Party::Caster => result.caster = scores,
        Party::Friendly => result.friendly = scores,
        Party::Hostile => result.hostile = scores,
    }
    result
}

/// Friendly vitals credited for the summons of the caster effect.
pub fn summon_bonus(skill: &Skill) -> SkillResult {
    let mut result = SkillResult::EMPTY;
    result.friendly.vitals = SUMMON_SCORE * skill.caster_effects.summons.len() as f32;
    result
}

fn control_penalty(effect: &SkillEffect, actor: &Actor, party: Party) -> f32 {
    let hostile = party == Party::Hostile;
    let mut penalty = 0.0;

    if effect.flags.contains(EffectFlags::STUN) && !actor.stun.is_immune {
        penalty += if hostile {
            STUN_HOSTILE_PENALTY
        } else {
            STUN_FRIENDLY_PENALTY
        };
    }
    if effect.flags.contains(EffectFlags::KNOCKBACK) {
        penalty += if hostile {
            KNOCKBACK_HOSTILE_PENALTY
        } else {
            KNOCKBACK_FRIENDLY_PENALTY
        };
    }

    penalty
}
