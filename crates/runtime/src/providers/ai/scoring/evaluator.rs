//! Evaluation of one skill against one target.

use game_core::{Actor, Position, Skill, SkillTarget, Target};
use rand::Rng;

use super::SkillResult;
use super::effects::{Side, apply_effect, summon_bonus};
use super::movement::movement_score;
use crate::providers::ai::context::AiContext;

/// Scores `skill` aimed at `target`.
///
/// Returns [`SkillResult::EMPTY`] when the combination is illegal: an empty
/// tile for a skill that is not position-targeted, an unaffordable cost, a
/// target beyond the skill's range, or a missing line of sight the skill
/// requires.
///
/// Otherwise the result folds together:
///
/// 1. The caster effect on the caster, including its cost
/// 2. Friendly credit for summons
/// 3. The movement gain when the caster effect moves the caster
/// 4. The target effect on every affected actor
/// 5. A uniform jitter in `[0, 1)`
///
/// # Arguments
///
/// * `ctx` - The deciding monster's context
/// * `skill` - Skill to evaluate
/// * `target` - Candidate target; "none" skills are passed the caster
/// * `rng` - Source for damage rolls and jitter
pub fn evaluate<R: Rng + ?Sized>(
    ctx: &AiContext<'_>,
    skill: &Skill,
    target: &Target<'_>,
    rng: &mut R,
) -> SkillResult {
    if target.is_empty() && skill.target != SkillTarget::Position {
        return SkillResult::EMPTY;
    }

    let caster = ctx.caster();
    if caster.attributes.can_afford(&skill.cost).is_err() {
        return SkillResult::EMPTY;
    }

    let destination = match skill.target {
        SkillTarget::None => ctx.position,
        SkillTarget::Position | SkillTarget::Character => target.position(),
    };
    let range = i64::from(caster.attributes.weighted_int(&skill.range));
    if i64::from(ctx.position.manhattan(destination)) > range {
        return SkillResult::EMPTY;
    }
    if skill.requires_line_of_sight() && !ctx.field.has_line_of_sight(destination) {
        return SkillResult::EMPTY;
    }

    let mut result = apply_effect(caster, caster, skill, Side::Caster, rng);
    result += summon_bonus(skill);
    result.random = rng.r#gen::<f32>();

    if skill.is_movement() {
        result.movement = movement_score(ctx, destination) - movement_score(ctx, ctx.position);
    }

    let radius = caster.attributes.weighted_int(&skill.radius);
    let affected: Vec<&Actor> = if skill.is_ground_effect() {
        area(ctx, ctx.position, radius)
    } else if radius <= 0 {
        match skill.target {
            SkillTarget::Character => target.actor().into_iter().collect(),
            SkillTarget::Position => area(ctx, destination, 0),
            SkillTarget::None => Vec::new(),
        }
    } else {
        area(ctx, destination, radius)
    };

    for actor in affected {
        result += apply_effect(caster, actor, skill, Side::Target, rng);
    }

    result
}

/// Living actors other than the caster within `radius` of `center`.
fn area<'a>(ctx: &AiContext<'a>, center: Position, radius: i32) -> Vec<&'a Actor> {
    ctx.occupants_within(center, radius)
        .into_iter()
        .filter_map(|target| target.actor())
        .filter(|actor| actor.is_alive() && !ctx.is_caster(actor))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::BotMemory;
    use game_core::{
        ActorId, AttributeKind, Attributes, BotConfig, DamageType, EffectFlags, EngineConfig,
        Faction, LevelMap, Monster, SkillAttributes, SkillEffect, SkillFlags, Tile, TileFlags,
    };
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn actor(id: &str, faction: Faction, life: f32) -> Actor {
        Actor {
            id: ActorId::new(id),
            name: id.to_owned(),
            faction,
            attributes: Attributes::resources(life, 0.0, 10.0),
            max_attributes: Attributes::resources(100.0, 0.0, 10.0),
            ..Actor::default()
        }
    }

    fn monster() -> Monster {
        Monster {
            actor: actor("m", Faction::Monster, 100.0),
            ..Monster::default()
        }
    }

    fn zap(range: f32, radius: f32) -> Skill {
        Skill {
            id: "zap".into(),
            name: "zap".into(),
            target: SkillTarget::Position,
            range: Attributes::constant(range),
            radius: Attributes::constant(radius),
            damage_amount: Attributes::constant(20.0),
            damage_type: DamageType::Electric,
            ..Skill::default()
        }
    }

    fn bite() -> Skill {
        Skill {
            id: "bite".into(),
            name: "bite".into(),
            target: SkillTarget::Character,
            range: Attributes::constant(1.0),
            damage_amount: Attributes::constant(20.0),
            damage_type: DamageType::Slash,
            ..Skill::default()
        }
    }

    struct Fixture {
        level: LevelMap,
        monster: Monster,
        engine: EngineConfig,
        memory: BotMemory,
    }

    impl Fixture {
        fn new(level: LevelMap) -> Self {
            Self {
                level,
                monster: monster(),
                engine: EngineConfig::default(),
                memory: BotMemory::default(),
            }
        }

        fn ctx(&self, at: Position) -> AiContext<'_> {
            AiContext::new(
                &self.level,
                at,
                &self.monster,
                BotConfig::default(),
                &self.engine,
                &self.memory,
                &self.memory,
            )
        }
    }

    fn with_player(mut level: LevelMap, at: Position, life: f32) -> LevelMap {
        level.insert(Tile::new(at, TileFlags::FREE).with_player(actor("p", Faction::Player, life)));
        level
    }

    #[test]
    fn out_of_range_is_empty() {
        let target = Position::new(3, 0);
        let fx = Fixture::new(with_player(LevelMap::open(0, 5, 1), target, 80.0));
        let ctx = fx.ctx(Position::ORIGIN);
        let mut rng = StdRng::seed_from_u64(1);

        let player = &fx.level.tile(target).unwrap().players[0];
        let result = evaluate(
            &ctx,
            &zap(2.0, 0.0),
            &Target::Player {
                player,
                position: target,
            },
            &mut rng,
        );

        assert!(result.is_empty());
    }

    #[test]
    fn hit_in_range_hurts_the_hostile() {
        let target = Position::new(1, 0);
        let fx = Fixture::new(with_player(LevelMap::open(0, 5, 1), target, 80.0));
        let ctx = fx.ctx(Position::ORIGIN);
        let mut rng = StdRng::seed_from_u64(1);
        let player = &fx.level.tile(target).unwrap().players[0];

        let result = evaluate(
            &ctx,
            &bite(),
            &Target::Player {
                player,
                position: target,
            },
            &mut rng,
        );

        assert!(result.hostile.vitals < 0.0);
        assert!((0.0..1.0).contains(&result.random));
    }

    #[test]
    fn character_skill_rejects_empty_tiles() {
        let fx = Fixture::new(LevelMap::open(0, 5, 1));
        let ctx = fx.ctx(Position::ORIGIN);
        let mut rng = StdRng::seed_from_u64(1);

        let result = evaluate(&ctx, &bite(), &Target::Empty(Position::new(1, 0)), &mut rng);

        assert!(result.is_empty());
    }

    #[test]
    fn unaffordable_is_empty() {
        let fx = Fixture::new(LevelMap::open(0, 5, 1));
        let ctx = fx.ctx(Position::ORIGIN);
        let mut rng = StdRng::seed_from_u64(1);
        let skill = Skill {
            cost: Attributes::resources(0.0, 0.0, 50.0),
            ..zap(4.0, 0.0)
        };

        let result = evaluate(&ctx, &skill, &Target::Empty(Position::new(1, 0)), &mut rng);

        assert!(result.is_empty());
    }

    #[test]
    fn line_of_sight_is_enforced() {
        let target = Position::new(2, 2);
        let level = with_player(
            LevelMap::from_ascii(0, &["...", ".#.", "..."]),
            target,
            80.0,
        );
        let fx = Fixture::new(level);
        let ctx = fx.ctx(Position::ORIGIN);
        let mut rng = StdRng::seed_from_u64(1);
        let skill = Skill {
            flags: SkillFlags::REQUIRES_LINE_OF_SIGHT,
            ..zap(4.0, 0.0)
        };

        let result = evaluate(&ctx, &skill, &Target::Empty(target), &mut rng);

        assert!(result.is_empty());
    }

    #[test]
    fn area_damage_spares_the_caster() {
        let fx = Fixture::new(with_player(LevelMap::open(0, 5, 1), Position::new(1, 0), 80.0));
        let ctx = fx.ctx(Position::ORIGIN);
        let mut rng = StdRng::seed_from_u64(1);
        let nova = Skill {
            target: SkillTarget::None,
            caster_effects: SkillEffect::with_flags(EffectFlags::GROUND_EFFECT),
            ..zap(0.0, 2.0)
        };

        let result = evaluate(&ctx, &nova, &ctx.self_target(), &mut rng);

        assert!(result.hostile.vitals < 0.0);
        assert_eq!(result.caster.vitals, 0.0);
    }

    #[test]
    fn movement_is_a_difference() {
        let fx = Fixture::new(LevelMap::open(0, 5, 1));
        let ctx = fx.ctx(Position::ORIGIN);
        let mut rng = StdRng::seed_from_u64(1);

        let step = evaluate(
            &ctx,
            &Skill::default_move(),
            &Target::Empty(Position::new(1, 0)),
            &mut rng,
        );

        let expected = ctx.config.restlessness * 0.01;
        assert!((step.movement - expected).abs() < 1e-6);
    }

    #[test]
    fn self_buff_scores_as_caster() {
        let fx = Fixture::new(LevelMap::open(0, 3, 1));
        let ctx = fx.ctx(Position::ORIGIN);
        let mut rng = StdRng::seed_from_u64(1);
        let rage = Skill {
            target: SkillTarget::None,
            caster_effects: SkillEffect {
                attributes: SkillAttributes::new()
                    .with(AttributeKind::Strength, Attributes::constant(10.0)),
                ..SkillEffect::default()
            },
            ..Skill::default()
        };

        let result = evaluate(&ctx, &rage, &ctx.self_target(), &mut rng);

        assert!(result.caster.buffs > 0.0);
        assert_eq!(result.hostile, Default::default());
    }
}
