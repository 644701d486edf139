//! Per-monster decision entry point.

use game_core::{Command, EngineConfig, LevelMap, Monster, Position};
use rand::Rng;

use super::catalog::SkillCatalog;
use super::command::CommandBuilder;
use super::context::AiContext;
use super::presets::{Behavior, BehaviorRegistry};
use super::scoring::SkillSelector;
use super::targets::TargetCatalog;
use crate::memory::{BotMemory, DecisionState, MemorySlot};

/// Text of the acknowledgment a stunned monster sends.
pub const STUNNED_YELL: &str = "stunned";

/// Outcome of one monster's decision.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    /// At most one command; `None` means the monster does nothing.
    pub command: Option<Command>,
    /// Memory to commit for the next tick.
    pub memory: BotMemory,
}

/// Scored monster AI.
///
/// The AI runs a fixed pipeline per monster:
///
/// 1. Short-circuit dead, disabled and stunned monsters
/// 2. Build the context (distance field, visible actors)
/// 3. Build the skill and target catalogs
/// 4. Pick the best (skill, target) pair
/// 5. Fall back to chasing, then to a committed goal, then to idling
///
/// The AI itself is stateless; memory comes in through the slot and goes
/// out in the [`Decision`].
#[derive(Clone, Copy, Debug)]
pub struct MonsterAi<'r> {
    engine: &'r EngineConfig,
    behaviors: &'r BehaviorRegistry,
}

impl<'r> MonsterAi<'r> {
    pub fn new(engine: &'r EngineConfig, behaviors: &'r BehaviorRegistry) -> Self {
        Self { engine, behaviors }
    }

    /// Decides what `monster` does this tick.
    ///
    /// # Arguments
    ///
    /// * `level` - Level the monster stands on
    /// * `position` - The monster's tile
    /// * `monster` - The deciding monster
    /// * `slot` - The monster's memory, read only
    /// * `rng` - Per-decision randomness
    ///
    /// # Returns
    ///
    /// The command (if any) and the memory to commit.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        level: &LevelMap,
        position: Position,
        monster: &Monster,
        slot: &MemorySlot,
        rng: &mut R,
    ) -> Decision {
        let carried = slot.current.aged(position);
        let name = &monster.actor.name;

        if !monster.actor.is_alive() {
            return Self::finish(monster, position, carried, DecisionState::Dead, None);
        }

        let config = match self.behaviors.resolve(&monster.algorithm) {
            Behavior::Disabled => {
                tracing::debug!("{} has no behavior", name);
                return Self::finish(monster, position, carried, DecisionState::Disabled, None);
            }
            Behavior::Scored(config) => config,
        };

        if monster.actor.is_stunned() {
            tracing::debug!("{} is stunned", name);
            let command = Some(Command::yell(STUNNED_YELL));
            return Self::finish(monster, position, carried, DecisionState::Stunned, command);
        }

        let ctx = AiContext::new(
            level,
            position,
            monster,
            config,
            self.engine,
            &carried,
            &slot.previous,
        );
        let skills = SkillCatalog::build(&ctx);
        let targets = TargetCatalog::build(&ctx, skills.max_range());
        let mut memory = carried.clone();

        if let Some(candidate) = SkillSelector::best(&ctx, &skills, &targets, rng) {
            let command = CommandBuilder::new(&ctx).build(&candidate, &mut memory, rng);
            let state = if candidate.skill.is_default_move() {
                DecisionState::Moving
            } else {
                DecisionState::UsingSkill
            };
            return Self::finish(monster, position, memory, state, Some(command));
        }

        let (state, command) = self.fallback(&ctx, &mut memory);
        Self::finish(monster, position, memory, state, command)
    }

    /// Chases a nearby hostile, else keeps walking to a committed goal.
    ///
    /// A goal the monster has failed to approach for two ticks is dropped.
    fn fallback(
        &self,
        ctx: &AiContext<'_>,
        memory: &mut BotMemory,
    ) -> (DecisionState, Option<Command>) {
        let name = &ctx.caster().name;

        let quarry = ctx
            .visible_hostiles()
            .iter()
            .find(|s| ctx.field.distance(s.position) <= self.engine.chase_distance);
        if let Some(sighting) = quarry {
            tracing::warn!(
                "{} found no usable skill, chasing {} at {}",
                name,
                sighting.actor.name,
                sighting.position
            );
            if self.engine.announce_status {
                memory.yell(format!("Chasing {}", sighting.actor.name));
            }
            return (DecisionState::Chasing, Some(Command::move_to(sighting.position)));
        }

        if memory.target_position.is_some() && self.is_stalled(ctx) {
            tracing::warn!("{} made no progress toward its goal, dropping it", name);
            memory.clear_target();
        }

        if let Some(goal) = memory.target_position {
            tracing::warn!("{} found no usable skill, continuing to {}", name, goal);
            if self.engine.announce_status {
                memory.yell("Moving on");
            }
            return (DecisionState::Wandering, Some(Command::move_to(goal)));
        }

        tracing::debug!("{} idles", name);
        (DecisionState::Idle, None)
    }

    /// Wandered from this very tile on each of the last two ticks.
    fn is_stalled(&self, ctx: &AiContext<'_>) -> bool {
        ctx.memory.wandered_from(ctx.position) && ctx.previous.wandered_from(ctx.position)
    }

    fn finish(
        monster: &Monster,
        position: Position,
        mut memory: BotMemory,
        state: DecisionState,
        command: Option<Command>,
    ) -> Decision {
        if memory.state != state {
            tracing::debug!(
                "{} state {} -> {}",
                monster.actor.name,
                memory.state,
                state
            );
        }
        memory.state = state;
        memory.position = Some(position);

        let command = command.map(|c| c.with_status(memory.status()));
        if let Some(command) = &command {
            tracing::debug!("{} decided: {}", monster.actor.name, command);
        }

        Decision { command, memory }
    }
}
