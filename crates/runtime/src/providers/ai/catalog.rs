//! The monster's castable skills this tick.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use game_core::Skill;

use crate::providers::ai::context::AiContext;

/// Synthetic one-tile step that competes with real skills.
pub static DEFAULT_MOVE: LazyLock<Skill> = LazyLock::new(Skill::default_move);

/// Castable skills bucketed by their evaluated range.
///
/// Filtering, in order:
///
/// 1. Passive skills are dropped.
/// 2. Skills whose cost the caster cannot pay are dropped.
/// 3. Out-of-combat skills are dropped while the monster was hurt within
///    the last `out_of_combat_turns` ticks.
/// 4. [`DEFAULT_MOVE`] is appended.
#[derive(Clone, Debug, Default)]
pub struct SkillCatalog<'a> {
    buckets: BTreeMap<u32, Vec<&'a Skill>>,
}

impl<'a> SkillCatalog<'a> {
    pub fn build(ctx: &AiContext<'a>) -> Self {
        let caster = ctx.caster();
        let in_combat = ctx.monster.last_damage_taken <= ctx.engine.out_of_combat_turns;
        let mut buckets: BTreeMap<u32, Vec<&'a Skill>> = BTreeMap::new();

        let usable = ctx.monster.skills.iter().filter(|skill| {
            if skill.is_passive() {
                return false;
            }
            if let Err(err) = caster.attributes.can_afford(&skill.cost) {
                tracing::debug!("Skill {} unaffordable: {}", skill.name, err);
                return false;
            }
            if in_combat && skill.requires_out_of_combat() {
                tracing::debug!("Skill {} locked while in combat", skill.name);
                return false;
            }
            true
        });

        let default_move: &'a Skill = &DEFAULT_MOVE;
        for skill in usable.chain(std::iter::once(default_move)) {
            let range = caster.attributes.weighted_int(&skill.range).max(0) as u32;
            buckets.entry(range).or_default().push(skill);
        }

        Self { buckets }
    }

    /// Buckets in ascending range.
    pub fn buckets(&self) -> impl Iterator<Item = (u32, &[&'a Skill])> {
        self.buckets.iter().map(|(r, s)| (*r, s.as_slice()))
    }

    /// The largest range present, 0 when empty.
    pub fn max_range(&self) -> u32 {
        self.buckets.keys().next_back().copied().unwrap_or(0)
    }

    pub fn skills(&self) -> impl Iterator<Item = &'a Skill> + '_ {
        self.buckets.values().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
