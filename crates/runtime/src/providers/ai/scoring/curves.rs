//! Scoring curves.
//!
//! # Vitals
//!
//! ```text
//! v(x) = ln(1 + 9·min(x, 1)) / ln(10)     x > 0
//! v(x) = ZERO_RESOURCE_SCORE               x ≤ 0
//! vitals = 4·v(life%) + 2·v(stamina%) + 1·v(mana%)
//! ```
//!
//! `v` rises steeply near empty and flattens near full, so the same heal is
//! worth more to a badly hurt actor. A resource driven to zero or below
//! drops to a fixed floor well under `v(0+) = 0`, which makes lethal and
//! fully draining effects stand out.
//!
//! # Buffs and Resistances
//!
//! ```text
//! b(s) = sign(s) · ln(1 + |s| / 10)
//! ```
//!
//! applied to each stat delta, weighted per stat.

use game_core::stats::{self, RESOURCE_WEIGHTS};
use game_core::{AttributeKind, Attributes};

/// Vitals value of a depleted resource.
pub const ZERO_RESOURCE_SCORE: f32 = -1.0;

/// Weight of each primary stat delta.
pub const BUFF_WEIGHT: f32 = 0.5;

/// Weight of each resistance delta.
pub const RESIST_WEIGHT: f32 = 0.3;

/// Saturating curve over one resource fraction.
pub fn vitals_curve(fraction: f32) -> f32 {
    let x = if fraction.is_nan() { 0.0 } else { fraction };
    if x <= 0.0 {
        return ZERO_RESOURCE_SCORE;
    }
    (1.0 + 9.0 * x.min(1.0)).ln() / std::f32::consts::LN_10
}

/// Weighted vitals of `current` against `maximum`.
pub fn vitals_score(current: &Attributes, maximum: &Attributes) -> f32 {
    RESOURCE_WEIGHTS
        .iter()
        .map(|&(kind, weight)| {
            weight * vitals_curve(stats::fraction(current[kind], maximum[kind]))
        })
        .sum()
}

/// Change in vitals when `delta` is applied to `current`.
///
/// A resource with no positive maximum contributes nothing, because its
/// fraction is zero before and after.
pub fn vitals_delta(current: &Attributes, maximum: &Attributes, delta: &Attributes) -> f32 {
    let mut after = *current;
    for kind in AttributeKind::RESOURCES {
        after[kind] += delta[kind];
    }
    vitals_score(&after, maximum) - vitals_score(current, maximum)
}

/// Signed logarithmic curve over a stat delta.
pub fn stat_curve(delta: f32) -> f32 {
    delta.signum() * (1.0 + delta.abs() / 10.0).ln()
}

/// Weighted score of the primary stat changes in `delta`.
pub fn buffs_score(delta: &Attributes) -> f32 {
    weighted_stat_score(delta, &AttributeKind::PRIMARY, BUFF_WEIGHT)
}

/// Weighted score of the resistance changes in `delta`.
pub fn resists_score(delta: &Attributes) -> f32 {
    weighted_stat_score(delta, &AttributeKind::RESISTANCES, RESIST_WEIGHT)
}

fn weighted_stat_score(delta: &Attributes, kinds: &[AttributeKind], weight: f32) -> f32 {
    kinds
        .iter()
        .filter(|&&kind| delta[kind] != 0.0)
        .map(|&kind| weight * stat_curve(delta[kind]))
        .sum()
}
