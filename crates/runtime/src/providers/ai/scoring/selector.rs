//! Selection of the best (skill, target) pair.
//!
//! Every legal pair is evaluated into a [`SkillResult`] and folded into one
//! scalar:
//!
//! ```text
//! base     = preservation·caster − aggression·hostile + support·friendly
//! combined = base·(1 + U[0,1)·0.2) + movement + randomness·random
//! ```
//!
//! The pair with the strictly highest combined score wins. The empty result
//! scores exactly 0, so a candidate must beat 0 to be chosen at all, and
//! pairs whose only effect is the jitter never compete. Ties keep the first
//! pair in enumeration order (skills by ascending range, targets by
//! ascending distance).

use game_core::{BotConfig, Skill, SkillTarget, Target};
use rand::Rng;

use super::SkillResult;
use super::evaluator::evaluate;
use crate::providers::ai::catalog::SkillCatalog;
use crate::providers::ai::context::AiContext;
use crate::providers::ai::targets::TargetCatalog;

/// Upper bound of the multiplicative jitter on the weighted base score.
pub const RANDOMIZATION: f32 = 0.2;

/// Extra hostile vitals credited to any targeted skill that hurts a hostile.
pub const HOSTILE_HIT_BONUS: f32 = -0.1;

/// The weighted sum before jitter and movement.
pub fn pre_randomization_score(result: &SkillResult, config: &BotConfig) -> f32 {
    config.preservation * result.caster.total() + config.support * result.friendly.total()
        - config.aggression * result.hostile.total()
}

/// Scales `score` by a factor in `[1, 1 + RANDOMIZATION)`.
pub fn randomize<R: Rng + ?Sized>(score: f32, rng: &mut R) -> f32 {
    score * (1.0 + rng.r#gen::<f32>() * RANDOMIZATION)
}

/// The scalar a candidate competes with.
pub fn combined_score<R: Rng + ?Sized>(
    result: &SkillResult,
    config: &BotConfig,
    rng: &mut R,
) -> f32 {
    randomize(pre_randomization_score(result, config), rng)
        + result.movement
        + config.randomness * result.random
}

/// A winning (skill, target) pair.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<'a> {
    pub skill: &'a Skill,
    pub target: Target<'a>,
    pub result: SkillResult,
    pub score: f32,
}

/// Best-pair search over the skill and target catalogs.
pub struct SkillSelector;

impl SkillSelector {
    /// Returns the highest scoring legal pair, or `None` when nothing beats
    /// the empty result.
    ///
    /// "None"-targeted skills are evaluated once against the caster. Other
    /// skills are evaluated against every target whose BFS distance is within
    /// the skill's range.
    pub fn best<'a, R: Rng + ?Sized>(
        ctx: &AiContext<'a>,
        skills: &SkillCatalog<'a>,
        targets: &TargetCatalog<'a>,
        rng: &mut R,
    ) -> Option<Candidate<'a>> {
        let mut best: Option<Candidate<'a>> = None;
        let mut best_score = 0.0;
        let mut evaluated = 0usize;

        tracing::debug!(
            "SkillSelector: {} skills x {} targets for {}",
            skills.len(),
            targets.len(),
            ctx.caster().name
        );

        for (range, bucket) in skills.buckets() {
            for &skill in bucket {
                if skill.target == SkillTarget::None {
                    let target = ctx.self_target();
                    let result = evaluate(ctx, skill, &target, rng);
                    evaluated += 1;
                    Self::consider(ctx, skill, target, result, rng, &mut best, &mut best_score);
                    continue;
                }

                for (_, group) in targets.within(range) {
                    for target in group {
                        let mut result = evaluate(ctx, skill, target, rng);
                        evaluated += 1;
                        if result.hostile.vitals < 0.0 {
                            result.hostile.vitals += HOSTILE_HIT_BONUS;
                        }
                        Self::consider(ctx, skill, *target, result, rng, &mut best, &mut best_score);
                    }
                }
            }
        }

        match &best {
            Some(candidate) => tracing::debug!(
                "SkillSelector: Best = {} on {} (score={:.4}, {} evaluated)",
                candidate.skill.name,
                candidate.target.name(),
                candidate.score,
                evaluated
            ),
            None => tracing::debug!(
                "SkillSelector: Nothing beats idling ({} evaluated)",
                evaluated
            ),
        }

        best
    }

    fn consider<'a, R: Rng + ?Sized>(
        ctx: &AiContext<'a>,
        skill: &'a Skill,
        target: Target<'a>,
        result: SkillResult,
        rng: &mut R,
        best: &mut Option<Candidate<'a>>,
        best_score: &mut f32,
    ) {
        if result.is_inert() {
            return;
        }

        let score = combined_score(&result, &ctx.config, rng);
        tracing::debug!(
            "  {} -> {} at {}: score={:.4} (caster={:.3}, friendly={:.3}, hostile={:.3}, move={:.3})",
            skill.name,
            target.name(),
            target.position(),
            score,
            result.caster.total(),
            result.friendly.total(),
            result.hostile.total(),
            result.movement
        );

        // Strictly greater: ties keep the earlier pair.
        if score > *best_score {
            *best_score = score;
            *best = Some(Candidate {
                skill,
                target,
                result,
                score,
            });
        }
    }
}
