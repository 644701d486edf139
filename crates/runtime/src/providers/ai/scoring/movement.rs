//! Positional desirability of a tile.
//!
//! # Formula
//!
//! ```text
//! score(pos) = hostile + friendly + restless + committed + tile
//!
//! hostile   = hf · (1 + 0.25·(n − 1)) / d_h        d_h ≥ 1, hf = 2·(health − 0.5)
//! friendly  = 0.3 / d_f                            d_f ≥ 1
//! restless  = restlessness · 0.01 · bfs(pos)
//! committed = −0.1 · manhattan(pos, memory target)
//! tile      = −0.3 stairs/spawn, −0.5 another monster
//! ```
//!
//! Standing on a hostile or a friendly (`d = 0`) scores −0.5 for that term.
//! A healthy monster is pulled toward the nearest hostile and a hurt one is
//! pushed away, more strongly the more hostiles it can see.

use game_core::Position;

use crate::providers::ai::context::AiContext;

/// Score of a position the monster cannot walk to.
pub const UNREACHABLE_SCORE: f32 = f32::MIN / 4.0;

/// Term for standing on top of another actor.
pub const STACKED_PENALTY: f32 = -0.5;

pub const FRIENDLY_PULL: f32 = 0.3;
pub const CROWD_FACTOR: f32 = 0.25;
pub const RESTLESSNESS_SCALE: f32 = 0.01;
pub const COMMITTED_TARGET_PULL: f32 = -0.1;
pub const STAIRS_PENALTY: f32 = -0.3;
pub const SHARED_TILE_PENALTY: f32 = -0.5;

/// Positional desirability of `position` for the deciding monster.
pub fn movement_score(ctx: &AiContext<'_>, position: Position) -> f32 {
    if !ctx.field.is_reachable(position) {
        return UNREACHABLE_SCORE;
    }

    hostile_term(ctx, position)
        + friendly_term(ctx, position)
        + restlessness_term(ctx, position)
        + committed_term(ctx, position)
        + tile_term(ctx, position)
}

fn hostile_term(ctx: &AiContext<'_>, position: Position) -> f32 {
    let hostiles = ctx.visible_hostiles();
    let Some(nearest) = hostiles.iter().map(|s| s.position.manhattan(position)).min() else {
        return 0.0;
    };
    if nearest == 0 {
        return STACKED_PENALTY;
    }

    let health_factor = 2.0 * (ctx.health() - 0.5);
    let crowd = 1.0 + CROWD_FACTOR * (hostiles.len() as f32 - 1.0);
    health_factor * crowd / nearest as f32
}

fn friendly_term(ctx: &AiContext<'_>, position: Position) -> f32 {
    match ctx
        .visible_friendlies()
        .iter()
        .map(|s| s.position.manhattan(position))
        .min()
    {
        None => 0.0,
        Some(0) => STACKED_PENALTY,
        Some(d) => FRIENDLY_PULL / d as f32,
    }
}

fn restlessness_term(ctx: &AiContext<'_>, position: Position) -> f32 {
    ctx.config.restlessness * RESTLESSNESS_SCALE * ctx.field.distance(position) as f32
}

fn committed_term(ctx: &AiContext<'_>, position: Position) -> f32 {
    ctx.memory
        .target_position
        .map_or(0.0, |target| {
            COMMITTED_TARGET_PULL * target.manhattan(position) as f32
        })
}

fn tile_term(ctx: &AiContext<'_>, position: Position) -> f32 {
    let Some(tile) = ctx.level().tile(position) else {
        return 0.0;
    };

    let mut score = 0.0;
    if tile.is_stairs_or_spawn() {
        score += STAIRS_PENALTY;
    }
    if tile.monsters.iter().any(|m| !ctx.is_caster(&m.actor)) {
        score += SHARED_TILE_PENALTY;
    }
    score
}
