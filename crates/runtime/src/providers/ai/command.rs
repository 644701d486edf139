//! Turns a winning (skill, target) pair into a command.

use game_core::{Command, Position, SkillTarget, SkillUseTarget};
use rand::Rng;

use crate::memory::BotMemory;
use crate::providers::ai::context::AiContext;
use crate::providers::ai::scoring::Candidate;

/// Manhattan radius searched around a projected point for a real tile.
pub const STRETCH_SEARCH_RADIUS: u32 = 8;

/// Weight of the distance to the projected point against the walking cost.
pub const STRETCH_DISTANCE_WEIGHT: u32 = 4;

/// Builds commands and records movement goals in the new memory.
pub struct CommandBuilder<'c, 'a> {
    ctx: &'c AiContext<'a>,
}

impl<'c, 'a> CommandBuilder<'c, 'a> {
    pub fn new(ctx: &'c AiContext<'a>) -> Self {
        Self { ctx }
    }

    /// Command for `candidate`.
    ///
    /// The default move becomes a plain move. When `memory` holds no
    /// movement goal yet, the step is projected into a far target that
    /// later ticks keep walking toward.
    ///
    /// # Arguments
    ///
    /// * `candidate` - The selected pair
    /// * `memory` - Memory being written for the next tick
    /// * `rng` - Source for the projection jitter
    pub fn build<R: Rng + ?Sized>(
        &self,
        candidate: &Candidate<'a>,
        memory: &mut BotMemory,
        rng: &mut R,
    ) -> Command {
        let skill = candidate.skill;
        let destination = candidate.target.position();

        if skill.is_default_move() {
            if memory.target_position.is_none() {
                if let Some(goal) = self.stretch(destination, rng) {
                    tracing::debug!(
                        "{} projects {} to {}",
                        self.ctx.caster().name,
                        destination,
                        goal
                    );
                    memory.commit_target(goal, self.ctx.engine.move_target_timeout);
                }
            }
            self.announce(memory, || "Catch me :)".to_owned());
            return Command::move_to(destination);
        }

        let target = match skill.target {
            SkillTarget::None => SkillUseTarget::None,
            SkillTarget::Character => match candidate.target.id() {
                Some(id) => SkillUseTarget::Character(id.clone()),
                None => SkillUseTarget::Position(destination),
            },
            SkillTarget::Position => SkillUseTarget::Position(destination),
        };

        self.announce(memory, || match &target {
            SkillUseTarget::None => format!("Using skill {}!", skill.name),
            SkillUseTarget::Character(_) => format!(
                "Using skill {}! -> {} {}",
                skill.name,
                destination,
                candidate.target.name()
            ),
            SkillUseTarget::Position(pos) => format!("Using skill {}! -> {}", skill.name, pos),
        });

        Command::use_skill(skill.id.clone(), target)
    }

    /// Projects a one-step move toward `toward` into a distant reachable tile.
    ///
    /// The step vector is scaled by `stretch_factor` and jittered by up to
    /// three tiles per axis. Among reachable free tiles within
    /// [`STRETCH_SEARCH_RADIUS`] of that point, the one minimising
    /// `4·distance_to_point + walking_distance` (plus a tiny jitter) wins.
    pub fn stretch<R: Rng + ?Sized>(&self, toward: Position, rng: &mut R) -> Option<Position> {
        let origin = self.ctx.position;
        let factor = self.ctx.engine.stretch_factor;
        let mut jitter = || rng.gen_range(0..4) - rng.gen_range(0..4);
        let projected = Position::new(
            origin.x + (toward.x - origin.x) * factor + jitter(),
            origin.y + (toward.y - origin.y) * factor + jitter(),
        );

        let mut best: Option<(f32, Position)> = None;
        for (position, entry) in self.ctx.field.reachable() {
            if position == origin {
                continue;
            }
            let offset = position.manhattan(projected);
            if offset > STRETCH_SEARCH_RADIUS || !entry.tile.is_none_or(|t| t.is_free()) {
                continue;
            }

            let cost = (STRETCH_DISTANCE_WEIGHT * offset + entry.distance) as f32
                + rng.r#gen::<f32>() / 100.0;
            if best.is_none_or(|(lowest, _)| cost < lowest) {
                best = Some((cost, position));
            }
        }

        best.map(|(_, position)| position)
    }

    fn announce(&self, memory: &mut BotMemory, text: impl FnOnce() -> String) {
        if self.ctx.engine.announce_status {
            memory.yell(text());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ai::catalog::DEFAULT_MOVE;
    use crate::providers::ai::scoring::SkillResult;
    use game_core::{
        Actor, ActorId, Attributes, BotConfig, CommandKind, EngineConfig, Faction, LevelMap,
        Monster, Skill, SkillUse, Target, Tile, TileFlags,
    };
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn monster() -> Monster {
        Monster {
            actor: Actor {
                id: ActorId::new("m"),
                name: "rat".into(),
                faction: Faction::Monster,
                attributes: Attributes::resources(10.0, 0.0, 0.0),
                max_attributes: Attributes::resources(10.0, 0.0, 0.0),
                ..Actor::default()
            },
            ..Monster::default()
        }
    }

    fn candidate<'a>(skill: &'a Skill, target: Target<'a>) -> Candidate<'a> {
        Candidate {
            skill,
            target,
            result: SkillResult::EMPTY,
            score: 1.0,
        }
    }

    #[test]
    fn default_move_commits_a_far_goal() {
        let level = LevelMap::open(0, 30, 1);
        let me = monster();
        let engine = EngineConfig::default();
        let carried = BotMemory::default();
        let ctx = AiContext::new(
            &level,
            Position::ORIGIN,
            &me,
            BotConfig::default(),
            &engine,
            &carried,
            &carried,
        );
        let mut memory = carried.clone();
        let mut rng = StdRng::seed_from_u64(5);

        let command = CommandBuilder::new(&ctx).build(
            &candidate(&DEFAULT_MOVE, Target::Empty(Position::new(1, 0))),
            &mut memory,
            &mut rng,
        );

        assert_eq!(command.kind, CommandKind::Move(Position::new(1, 0)));
        let goal = memory.target_position.expect("goal");
        assert!(goal.x >= 5 && goal.x <= 11, "goal {goal}");
        assert_eq!(memory.target_timeout, engine.move_target_timeout);
        assert_eq!(memory.status().as_deref(), Some("Catch me :)"));
    }

    #[test]
    fn existing_goal_is_kept() {
        let level = LevelMap::open(0, 30, 1);
        let me = monster();
        let engine = EngineConfig::default();
        let mut carried = BotMemory::default();
        carried.commit_target(Position::new(20, 0), 3);
        let ctx = AiContext::new(
            &level,
            Position::ORIGIN,
            &me,
            BotConfig::default(),
            &engine,
            &carried,
            &carried,
        );
        let mut memory = carried.clone();
        let mut rng = StdRng::seed_from_u64(5);

        CommandBuilder::new(&ctx).build(
            &candidate(&DEFAULT_MOVE, Target::Empty(Position::new(1, 0))),
            &mut memory,
            &mut rng,
        );

        assert_eq!(memory.target_position, Some(Position::new(20, 0)));
        assert_eq!(memory.target_timeout, 3);
    }

    #[test]
    fn character_skill_targets_the_actor() {
        let player = Actor {
            id: ActorId::new("p1"),
            name: "hero".into(),
            faction: Faction::Player,
            ..Actor::default()
        };
        let mut level = LevelMap::open(0, 3, 1);
        level.insert(Tile::new(Position::new(1, 0), TileFlags::FREE).with_player(player));
        let me = monster();
        let engine = EngineConfig {
            announce_status: false,
            ..EngineConfig::default()
        };
        let carried = BotMemory::default();
        let ctx = AiContext::new(
            &level,
            Position::ORIGIN,
            &me,
            BotConfig::default(),
            &engine,
            &carried,
            &carried,
        );
        let bite = Skill {
            id: "bite".into(),
            name: "bite".into(),
            target: SkillTarget::Character,
            ..Skill::default()
        };
        let tile = level.tile(Position::new(1, 0)).unwrap();
        let mut memory = BotMemory::default();
        let mut rng = StdRng::seed_from_u64(5);

        let command = CommandBuilder::new(&ctx).build(
            &candidate(
                &bite,
                Target::Player {
                    player: &tile.players[0],
                    position: tile.position,
                },
            ),
            &mut memory,
            &mut rng,
        );

        assert_eq!(
            command.kind,
            CommandKind::UseSkill(SkillUse {
                skill_id: "bite".into(),
                target: SkillUseTarget::Character(ActorId::new("p1")),
            })
        );
        assert!(memory.yells.is_empty());
    }

    #[test]
    fn stretch_lands_on_a_reachable_free_tile() {
        let level = LevelMap::from_ascii(0, &["....#....", "....#...."]);
        let me = monster();
        let engine = EngineConfig {
            stretch_factor: 2,
            ..EngineConfig::default()
        };
        let carried = BotMemory::default();
        let ctx = AiContext::new(
            &level,
            Position::ORIGIN,
            &me,
            BotConfig::default(),
            &engine,
            &carried,
            &carried,
        );
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..20 {
            let goal = CommandBuilder::new(&ctx)
                .stretch(Position::new(1, 0), &mut rng)
                .expect("goal");
            assert!(ctx.field.is_reachable(goal));
            assert!(goal.x < 4);
        }
    }

    #[test]
    fn stretch_accepts_unknown_floor() {
        let level = LevelMap::new(0, 30, 1);
        let me = monster();
        let engine = EngineConfig::default();
        let carried = BotMemory::default();
        let ctx = AiContext::new(
            &level,
            Position::ORIGIN,
            &me,
            BotConfig::default(),
            &engine,
            &carried,
            &carried,
        );
        let mut rng = StdRng::seed_from_u64(3);

        let goal = CommandBuilder::new(&ctx)
            .stretch(Position::new(1, 0), &mut rng)
            .expect("goal");
        assert!(level.tile(goal).is_none());
        assert!(goal.x > 0);
    }
}
