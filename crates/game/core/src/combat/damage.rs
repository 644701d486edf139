//! Damage estimation.
//!
//! The server resolves combat authoritatively; these functions only predict
//! how much a skill would hurt so the AI can score it.

use crate::stats::{AttributeKind, Attributes};

// ============================================================================
// Damage Type
// ============================================================================

/// Damage type of a skill, selecting which resistance applies.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageType {
    /// No damage; the skill only applies effects.
    #[default]
    None,
    Slash,
    Pierce,
    Fire,
    Poison,
    Electric,
}

impl DamageType {
    /// The resistance component that mitigates this damage type.
    pub const fn resistance(self) -> Option<AttributeKind> {
        match self {
            Self::None => None,
            Self::Slash => Some(AttributeKind::SlashResist),
            Self::Pierce => Some(AttributeKind::PierceResist),
            Self::Fire => Some(AttributeKind::FireResist),
            Self::Poison => Some(AttributeKind::PoisonResist),
            Self::Electric => Some(AttributeKind::ElectricResist),
        }
    }
}

// ============================================================================
// Damage Calculation
// ============================================================================

/// Lowest resistance value taken into account; anything below is clamped.
pub const MIN_RESISTANCE: f32 = -5.0;

/// Maximum relative deviation of a damage roll from the raw value.
pub const DAMAGE_VARIANCE: f32 = 0.2;

/// Raw damage of `power` against `resistance`.
///
/// # Formula
///
/// ```text
/// damage = power * 10 / (10 + max(resistance, -5))
/// ```
///
/// Zero resistance passes damage through unchanged, while the clamp caps
/// vulnerability at double damage.
pub fn raw_damage(power: f32, resistance: f32) -> f32 {
    power * 10.0 / (10.0 + resistance.max(MIN_RESISTANCE))
}

/// Raw damage of `power` of `damage_type` against a defender's attributes.
pub fn damage_against(power: f32, damage_type: DamageType, defender: &Attributes) -> f32 {
    let resistance = damage_type
        .resistance()
        .map_or(0.0, |kind| defender[kind]);
    raw_damage(power, resistance)
}

/// Applies a roll in `[-1, 1]` to `raw`, scaled by [`DAMAGE_VARIANCE`].
///
/// # Arguments
///
/// * `raw` - Damage from [`raw_damage`]
/// * `roll` - Uniform sample in `[-1, 1]`; values outside are clamped
pub fn vary(raw: f32, roll: f32) -> f32 {
    raw * (1.0 + DAMAGE_VARIANCE * roll.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_resistance_passes_damage_through() {
        assert_eq!(raw_damage(20.0, 0.0), 20.0);
    }

    #[test]
    fn negative_resistance_is_clamped() {
        assert_eq!(raw_damage(20.0, -5.0), 40.0);
        assert_eq!(raw_damage(20.0, -50.0), 40.0);
        assert_eq!(raw_damage(20.0, 10.0), 10.0);
    }

    #[test]
    fn damage_type_selects_resistance() {
        let defender = Attributes::ZERO.with(AttributeKind::FireResist, 10.0);
        assert_eq!(damage_against(20.0, DamageType::Fire, &defender), 10.0);
        assert_eq!(damage_against(20.0, DamageType::Slash, &defender), 20.0);
        assert_eq!(damage_against(20.0, DamageType::None, &defender), 20.0);
    }

    #[test]
    fn variance_is_bounded() {
        assert!((vary(100.0, 1.0) - 120.0).abs() < 1e-4);
        assert!((vary(100.0, -3.0) - 80.0).abs() < 1e-4);
        assert_eq!(vary(100.0, 0.0), 100.0);
    }
}
