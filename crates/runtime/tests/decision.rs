//! End-to-end checks of single monster decisions.

use game_core::{
    Actor, ActorId, Attributes, BotConfig, CommandKind, DamageType, EngineConfig, Faction,
    LevelMap, Monster, Position, Skill, SkillTarget, SkillUseTarget, Target, Tile, TileFlags,
    SkillFlags, damage_against,
};
use game_core::combat::DAMAGE_VARIANCE;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use runtime::providers::ai::UNREACHABLE;
use runtime::providers::ai::scoring::curves::vitals_score;
use runtime::providers::ai::scoring::{PartyScores, evaluate, pre_randomization_score};
use runtime::{AiContext, BehaviorRegistry, BotMemory, DistanceField, MemorySlot, MonsterAi};

fn actor(id: &str, faction: Faction, life: f32, max_life: f32) -> Actor {
    Actor {
        id: ActorId::new(id),
        name: id.to_owned(),
        faction,
        attributes: Attributes::resources(life, 0.0, 0.0),
        max_attributes: Attributes::resources(max_life, 0.0, 0.0),
        ..Actor::default()
    }
}

fn bolt(range: f32) -> Skill {
    Skill {
        id: "bolt".into(),
        name: "Bolt".into(),
        target: SkillTarget::Position,
        range: Attributes::constant(range),
        damage_amount: Attributes::constant(20.0),
        damage_type: DamageType::Fire,
        ..Skill::default()
    }
}

#[test]
fn open_three_by_three_field() {
    let level = LevelMap::open(0, 3, 3);
    let field = DistanceField::compute(&level, Position::new(1, 1));

    assert_eq!(field.distance(Position::new(1, 1)), 0);
    assert_eq!(field.distance(Position::new(0, 0)), 2);
    assert!(field.has_line_of_sight(Position::new(0, 0)));
    assert_eq!(field.len(), 9);
}

#[test]
fn walled_off_tiles_report_the_sentinel() {
    let level = LevelMap::from_ascii(0, &[".#.", ".#.", ".#."]);
    let field = DistanceField::compute(&level, Position::ORIGIN);

    assert_eq!(field.distance(Position::new(0, 2)), 2);
    assert_eq!(field.distance(Position::new(2, 0)), UNREACHABLE);
    assert!(!field.has_line_of_sight(Position::new(2, 0)));
}

#[test]
fn twenty_damage_takes_a_fifth_of_life() {
    let hero = actor("p", Faction::Player, 80.0, 100.0);
    assert_eq!(damage_against(20.0, DamageType::Fire, &hero.attributes), 20.0);

    let mut level = LevelMap::open(0, 2, 1);
    let at = Position::new(1, 0);
    level.insert(Tile::new(at, TileFlags::FREE).with_player(hero.clone()));
    let monster = Monster {
        actor: actor("m", Faction::Monster, 50.0, 50.0),
        skills: vec![bolt(1.0)],
        ..Monster::default()
    };
    let engine = EngineConfig::default();
    let memory = BotMemory::default();
    let ctx = AiContext::new(
        &level,
        Position::ORIGIN,
        &monster,
        BotConfig::default(),
        &engine,
        &memory,
        &memory,
    );
    let player = &level.tile(at).unwrap().players[0];

    let life_left = |life: f32| {
        let mut after = hero.attributes;
        after.life = life;
        vitals_score(&after, &hero.max_attributes) - vitals_score(&hero.attributes, &hero.max_attributes)
    };
    let spread = 20.0 * DAMAGE_VARIANCE;

    for seed in 0..32 {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = evaluate(
            &ctx,
            &monster.skills[0],
            &Target::Player {
                player,
                position: at,
            },
            &mut rng,
        );

        assert!(result.hostile.vitals < 0.0);
        assert!(result.hostile.vitals >= life_left(60.0 - spread) - 1e-5);
        assert!(result.hostile.vitals <= life_left(60.0 + spread) + 1e-5);
        assert_eq!(result.friendly, PartyScores::default());
    }
}

#[test]
fn bolt_out_of_reach_scores_nothing() {
    let mut level = LevelMap::open(0, 5, 1);
    let at = Position::new(3, 0);
    level.insert(Tile::new(at, TileFlags::FREE).with_player(actor("p", Faction::Player, 80.0, 100.0)));
    let monster = Monster {
        actor: actor("m", Faction::Monster, 50.0, 50.0),
        skills: vec![bolt(2.0)],
        ..Monster::default()
    };
    let engine = EngineConfig::default();
    let memory = BotMemory::default();
    let ctx = AiContext::new(
        &level,
        Position::ORIGIN,
        &monster,
        BotConfig::default(),
        &engine,
        &memory,
        &memory,
    );
    let player = &level.tile(at).unwrap().players[0];
    let mut rng = StdRng::seed_from_u64(4);

    let result = evaluate(
        &ctx,
        &monster.skills[0],
        &Target::Player {
            player,
            position: at,
        },
        &mut rng,
    );
    assert!(result.is_empty());

    let close = evaluate(&ctx, &bolt(3.0), &Target::Player { player, position: at }, &mut rng);
    assert!(close.hostile.vitals < 0.0);
}

#[test]
fn hostile_damage_weighs_by_aggression() {
    let config = BotConfig::new(4.0, 2.0, 1.5, 7.0, 0.03);
    let result = runtime::SkillResult {
        hostile: PartyScores {
            vitals: -0.3,
            ..PartyScores::default()
        },
        ..runtime::SkillResult::EMPTY
    };

    assert!((pre_randomization_score(&result, &config) - 1.2).abs() < 1e-6);
}

#[test]
fn ranged_monster_fires_at_a_distant_hero() {
    let mut level = LevelMap::open(0, 6, 1);
    let at = Position::new(4, 0);
    level.insert(Tile::new(at, TileFlags::FREE).with_player(actor("p", Faction::Player, 30.0, 100.0)));
    let monster = Monster {
        actor: actor("m", Faction::Monster, 50.0, 50.0),
        skills: vec![bolt(5.0)],
        algorithm: "aggressive".into(),
        ..Monster::default()
    };
    let engine = EngineConfig::default();
    let behaviors = BehaviorRegistry::with_presets();
    let mut rng = StdRng::seed_from_u64(17);

    let decision = MonsterAi::new(&engine, &behaviors).decide(
        &level,
        Position::ORIGIN,
        &monster,
        &MemorySlot::default(),
        &mut rng,
    );

    let command = decision.command.expect("a command");
    match command.kind {
        CommandKind::UseSkill(usage) => {
            assert_eq!(usage.skill_id, "bolt");
            assert_eq!(usage.target, SkillUseTarget::Position(at));
        }
        other => panic!("expected a skill use, got {other:?}"),
    }
}

fn decide_around_a_corner(flags: SkillFlags, seed: u64) -> Option<CommandKind> {
    let mut level = LevelMap::from_ascii(0, &[".#.", "..."]);
    let hidden = Position::new(2, 0);
    level.insert(
        Tile::new(hidden, TileFlags::FREE).with_player(actor("p", Faction::Player, 30.0, 100.0)),
    );
    let monster = Monster {
        actor: actor("m", Faction::Monster, 50.0, 50.0),
        skills: vec![Skill {
            target: SkillTarget::Character,
            flags,
            ..bolt(5.0)
        }],
        algorithm: "aggressive".into(),
        ..Monster::default()
    };
    let engine = EngineConfig::default();
    let behaviors = BehaviorRegistry::with_presets();
    let mut rng = StdRng::seed_from_u64(seed);

    MonsterAi::new(&engine, &behaviors)
        .decide(
            &level,
            Position::ORIGIN,
            &monster,
            &MemorySlot::default(),
            &mut rng,
        )
        .command
        .map(|c| c.kind)
}

#[test]
fn sighted_skills_never_hit_hidden_heroes() {
    let level = LevelMap::from_ascii(0, &[".#.", "..."]);
    let field = DistanceField::compute(&level, Position::ORIGIN);
    assert_eq!(field.distance(Position::new(2, 0)), 4);
    assert!(!field.has_line_of_sight(Position::new(2, 0)));

    for seed in 0..16 {
        let kind = decide_around_a_corner(SkillFlags::REQUIRES_LINE_OF_SIGHT, seed);
        assert!(
            !matches!(kind, Some(CommandKind::UseSkill(_))),
            "seed {seed} cast {kind:?}"
        );
    }

    let unsighted = decide_around_a_corner(SkillFlags::empty(), 0);
    assert_eq!(
        unsighted,
        Some(CommandKind::UseSkill(game_core::SkillUse {
            skill_id: "bolt".into(),
            target: SkillUseTarget::Character(ActorId::new("p")),
        }))
    );
}

proptest! {
    #[test]
    fn never_casts_what_it_cannot_afford(
        mana in 0.0f32..20.0,
        cost in 0.0f32..30.0,
        seed in any::<u64>(),
    ) {
        let mut level = LevelMap::open(0, 3, 1);
        level.insert(
            Tile::new(Position::new(1, 0), TileFlags::FREE)
                .with_player(actor("p", Faction::Player, 60.0, 100.0)),
        );
        let mut caster = actor("m", Faction::Monster, 40.0, 40.0);
        caster.attributes.mana = mana;
        caster.max_attributes.mana = 20.0;
        let skill = Skill {
            cost: Attributes::resources(0.0, 0.0, cost),
            ..bolt(2.0)
        };
        let monster = Monster {
            actor: caster,
            skills: vec![skill.clone()],
            ..Monster::default()
        };
        let engine = EngineConfig::default();
        let behaviors = BehaviorRegistry::with_presets();
        let mut rng = StdRng::seed_from_u64(seed);

        let decision = MonsterAi::new(&engine, &behaviors).decide(
            &level,
            Position::ORIGIN,
            &monster,
            &MemorySlot::default(),
            &mut rng,
        );

        if let Some(CommandKind::UseSkill(usage)) = decision.command.map(|c| c.kind) {
            prop_assert_eq!(usage.skill_id.as_str(), "bolt");
            prop_assert!(monster.actor.attributes.can_afford(&skill.cost).is_ok());
        }
    }
}
