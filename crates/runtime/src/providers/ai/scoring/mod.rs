//! Skill scoring for the monster AI.
//!
//! Scoring is split by concern:
//!
//! 1. **Curves** ([`curves`]): saturating maps from resources and stat deltas
//!    to scores
//! 2. **Effects** ([`effects`]): one skill effect applied to one actor
//! 3. **Movement** ([`movement`]): positional desirability of a tile
//! 4. **Evaluation** ([`evaluator`]): one skill against one target
//! 5. **Selection** ([`selector`]): the best (skill, target) over all
//!    candidates
//!
//! # Structured Results
//!
//! Every evaluation produces a [`SkillResult`]. Results from different
//! affected actors fold together with `+`, which is component-wise and
//! therefore associative and commutative:
//!
//! ```text
//! SkillResult
//!   ├─ caster   { vitals, buffs, resists }
//!   ├─ friendly { vitals, buffs, resists }
//!   ├─ hostile  { vitals, buffs, resists }
//!   ├─ movement
//!   └─ random
//! ```
//!
//! All functions here are pure given their inputs and the supplied RNG.
//! Logging happens in the selector from the returned values.

pub mod curves;
pub mod effects;
pub mod evaluator;
pub mod movement;
pub mod selector;

use std::iter::Sum;
use std::ops::{Add, AddAssign};

pub use evaluator::evaluate;
pub use movement::movement_score;
pub use selector::{Candidate, SkillSelector, combined_score, pre_randomization_score};

/// Scores of one party (caster, friendlies or hostiles).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PartyScores {
    /// Change in resource (life, stamina, mana) desirability.
    pub vitals: f32,
    /// Change in primary stats.
    pub buffs: f32,
    /// Change in resistances.
    pub resists: f32,
}

impl PartyScores {
    pub fn total(&self) -> f32 {
        self.vitals + self.buffs + self.resists
    }
}

impl Add for PartyScores {
    type Output = PartyScores;

    fn add(self, rhs: PartyScores) -> PartyScores {
        PartyScores {
            vitals: self.vitals + rhs.vitals,
            buffs: self.buffs + rhs.buffs,
            resists: self.resists + rhs.resists,
        }
    }
}

/// Accumulated score of one (skill, target) pair.
///
/// The default value is the "empty" result of a rejected combination.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SkillResult {
    /// Effects on the monster itself.
    pub caster: PartyScores,
    pub friendly: PartyScores,
    pub hostile: PartyScores,
    /// Positional gain of a movement skill for the caster.
    pub movement: f32,
    /// Uniform jitter in `[0, 1)`.
    pub random: f32,
}

impl SkillResult {
    /// The result of a rejected combination.
    pub const EMPTY: Self = Self {
        caster: PartyScores {
            vitals: 0.0,
            buffs: 0.0,
            resists: 0.0,
        },
        friendly: PartyScores {
            vitals: 0.0,
            buffs: 0.0,
            resists: 0.0,
        },
        hostile: PartyScores {
            vitals: 0.0,
            buffs: 0.0,
            resists: 0.0,
        },
        movement: 0.0,
        random: 0.0,
    };

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Returns true when nothing but the jitter is set.
    ///
    /// A legal pair that changes nothing (a step onto the caster's own tile,
    /// a strike at the caster) is inert.
    pub fn is_inert(&self) -> bool {
        Self {
            random: 0.0,
            ..*self
        }
        .is_empty()
    }
}

impl Add for SkillResult {
    type Output = SkillResult;

    fn add(self, rhs: SkillResult) -> SkillResult {
        SkillResult {
            caster: self.caster + rhs.caster,
            friendly: self.friendly + rhs.friendly,
            hostile: self.hostile + rhs.hostile,
            movement: self.movement + rhs.movement,
            random: self.random + rhs.random,
        }
    }
}

impl AddAssign for SkillResult {
    fn add_assign(&mut self, rhs: SkillResult) {
        *self = *self + rhs;
    }
}

impl Sum for SkillResult {
    fn sum<I: Iterator<Item = SkillResult>>(iter: I) -> SkillResult {
        iter.fold(SkillResult::EMPTY, Add::add)
    }
}
