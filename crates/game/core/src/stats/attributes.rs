//! Attribute vectors and symbolic attribute templates.
//!
//! The same [`Attributes`] shape serves two roles:
//!
//! - **State**: an actor's current or maximum values (resources, primary
//!   stats, resistances).
//! - **Template**: a skill field (range, radius, duration, cost, damage,
//!   effect deltas) whose per-stat entries are *multipliers*. A template is
//!   resolved against an actor through [`Attributes::weighted_value`]:
//!
//! ```text
//! weighted_value = Σ actor[k] × template[k]  +  template.constant
//! ```
//!
//! Missing template fields on the wire default to zero, so a template that
//! was never filled in evaluates to its constant bias (usually zero).

use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

use crate::error::RequirementError;

/// One named component of an [`Attributes`] vector.
///
/// Declaration order is the order requirement checks are reported in.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttributeKind {
    Strength,
    Dexterity,
    Intelligence,
    Willpower,
    Constitution,
    SlashResist,
    PierceResist,
    FireResist,
    PoisonResist,
    ElectricResist,
    Life,
    Stamina,
    Mana,
}

impl AttributeKind {
    pub const COUNT: usize = 13;

    pub const ALL: [AttributeKind; Self::COUNT] = [
        Self::Strength,
        Self::Dexterity,
        Self::Intelligence,
        Self::Willpower,
        Self::Constitution,
        Self::SlashResist,
        Self::PierceResist,
        Self::FireResist,
        Self::PoisonResist,
        Self::ElectricResist,
        Self::Life,
        Self::Stamina,
        Self::Mana,
    ];

    /// The five primary stats scored as "buffs".
    pub const PRIMARY: [AttributeKind; 5] = [
        Self::Strength,
        Self::Dexterity,
        Self::Intelligence,
        Self::Willpower,
        Self::Constitution,
    ];

    /// The five damage-type resistances.
    pub const RESISTANCES: [AttributeKind; 5] = [
        Self::SlashResist,
        Self::PierceResist,
        Self::FireResist,
        Self::PoisonResist,
        Self::ElectricResist,
    ];

    /// The three spendable resources.
    pub const RESOURCES: [AttributeKind; 3] = [Self::Life, Self::Stamina, Self::Mana];
}

/// A named attribute vector plus a constant bias.
///
/// The bias is only meaningful for templates; on actor state it is ignored by
/// every operation except arithmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Attributes {
    pub strength: f32,
    pub dexterity: f32,
    pub intelligence: f32,
    pub willpower: f32,
    pub constitution: f32,
    pub slash_resist: f32,
    pub pierce_resist: f32,
    pub fire_resist: f32,
    pub poison_resist: f32,
    pub electric_resist: f32,
    pub life: f32,
    pub stamina: f32,
    pub mana: f32,
    pub constant: f32,
}

impl Attributes {
    pub const ZERO: Self = Self {
        strength: 0.0,
        dexterity: 0.0,
        intelligence: 0.0,
        willpower: 0.0,
        constitution: 0.0,
        slash_resist: 0.0,
        pierce_resist: 0.0,
        fire_resist: 0.0,
        poison_resist: 0.0,
        electric_resist: 0.0,
        life: 0.0,
        stamina: 0.0,
        mana: 0.0,
        constant: 0.0,
    };

    /// Template that always evaluates to `value`.
    pub const fn constant(value: f32) -> Self {
        let mut attrs = Self::ZERO;
        attrs.constant = value;
        attrs
    }

    /// Resource-only vector (life, stamina, mana).
    pub const fn resources(life: f32, stamina: f32, mana: f32) -> Self {
        let mut attrs = Self::ZERO;
        attrs.life = life;
        attrs.stamina = stamina;
        attrs.mana = mana;
        attrs
    }

    /// Builder-style setter for a single component.
    #[must_use]
    pub fn with(mut self, kind: AttributeKind, value: f32) -> Self {
        self[kind] = value;
        self
    }

    #[inline]
    pub fn get(&self, kind: AttributeKind) -> f32 {
        self[kind]
    }

    /// Evaluates `template` against this actor state.
    ///
    /// Bilinear in `(self, template)` apart from the constant bias, which is
    /// added unscaled. The all-zero template yields exactly its bias.
    pub fn weighted_value(&self, template: &Attributes) -> f32 {
        AttributeKind::ALL
            .iter()
            .map(|&kind| self[kind] * template[kind])
            .sum::<f32>()
            + template.constant
    }

    /// [`Self::weighted_value`] truncated toward zero, for ranges, radii and
    /// durations.
    pub fn weighted_int(&self, template: &Attributes) -> i32 {
        self.weighted_value(template) as i32
    }

    /// Checks that every component is at least the required one.
    ///
    /// Components are compared in [`AttributeKind::ALL`] order and the first
    /// shortfall is reported.
    pub fn meets(&self, required: &Attributes) -> Result<(), RequirementError> {
        match AttributeKind::ALL
            .iter()
            .find(|&&kind| self[kind] < required[kind])
        {
            Some(&kind) => Err(RequirementError {
                kind,
                have: self[kind],
                need: required[kind],
            }),
            None => Ok(()),
        }
    }

    /// Checks only the components that `cost` actually charges (> 0).
    ///
    /// A zero entry never blocks, so negative resistances or an empty cost do
    /// not make a skill unaffordable.
    pub fn can_afford(&self, cost: &Attributes) -> Result<(), RequirementError> {
        match AttributeKind::ALL
            .iter()
            .find(|&&kind| cost[kind] > 0.0 && self[kind] < cost[kind])
        {
            Some(&kind) => Err(RequirementError {
                kind,
                have: self[kind],
                need: cost[kind],
            }),
            None => Ok(()),
        }
    }

    /// Component-wise map, constant included.
    pub fn map(self, mut f: impl FnMut(f32) -> f32) -> Self {
        let mut out = Self::ZERO;
        for kind in AttributeKind::ALL {
            out[kind] = f(self[kind]);
        }
        out.constant = f(self.constant);
        out
    }

    /// Returns true when every component and the bias are zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Index<AttributeKind> for Attributes {
    type Output = f32;

    fn index(&self, kind: AttributeKind) -> &f32 {
        match kind {
            AttributeKind::Strength => &self.strength,
            AttributeKind::Dexterity => &self.dexterity,
            AttributeKind::Intelligence => &self.intelligence,
            AttributeKind::Willpower => &self.willpower,
            AttributeKind::Constitution => &self.constitution,
            AttributeKind::SlashResist => &self.slash_resist,
            AttributeKind::PierceResist => &self.pierce_resist,
            AttributeKind::FireResist => &self.fire_resist,
            AttributeKind::PoisonResist => &self.poison_resist,
            AttributeKind::ElectricResist => &self.electric_resist,
            AttributeKind::Life => &self.life,
            AttributeKind::Stamina => &self.stamina,
            AttributeKind::Mana => &self.mana,
        }
    }
}

impl IndexMut<AttributeKind> for Attributes {
    fn index_mut(&mut self, kind: AttributeKind) -> &mut f32 {
        match kind {
            AttributeKind::Strength => &mut self.strength,
            AttributeKind::Dexterity => &mut self.dexterity,
            AttributeKind::Intelligence => &mut self.intelligence,
            AttributeKind::Willpower => &mut self.willpower,
            AttributeKind::Constitution => &mut self.constitution,
            AttributeKind::SlashResist => &mut self.slash_resist,
            AttributeKind::PierceResist => &mut self.pierce_resist,
            AttributeKind::FireResist => &mut self.fire_resist,
            AttributeKind::PoisonResist => &mut self.poison_resist,
            AttributeKind::ElectricResist => &mut self.electric_resist,
            AttributeKind::Life => &mut self.life,
            AttributeKind::Stamina => &mut self.stamina,
            AttributeKind::Mana => &mut self.mana,
        }
    }
}

impl Add for Attributes {
    type Output = Attributes;

    fn add(mut self, rhs: Attributes) -> Attributes {
        for kind in AttributeKind::ALL {
            self[kind] += rhs[kind];
        }
        self.constant += rhs.constant;
        self
    }
}

impl Sub for Attributes {
    type Output = Attributes;

    fn sub(self, rhs: Attributes) -> Attributes {
        self + (-rhs)
    }
}

impl Neg for Attributes {
    type Output = Attributes;

    fn neg(self) -> Attributes {
        self.map(|v| -v)
    }
}

impl Mul<f32> for Attributes {
    type Output = Attributes;

    fn mul(self, rhs: f32) -> Attributes {
        self.map(|v| v * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_attributes() -> impl Strategy<Value = Attributes> {
        prop::array::uniform14(-50i16..50i16).prop_map(|values| {
            let mut attrs = Attributes::ZERO;
            for (kind, v) in AttributeKind::ALL.iter().zip(values.iter()) {
                attrs[*kind] = f32::from(*v);
            }
            attrs.constant = f32::from(values[13]);
            attrs
        })
    }

    #[test]
    fn weighted_value_is_dot_product_plus_bias() {
        let actor = Attributes::ZERO
            .with(AttributeKind::Strength, 10.0)
            .with(AttributeKind::Mana, 4.0);
        let template = Attributes::constant(1.5)
            .with(AttributeKind::Strength, 0.5)
            .with(AttributeKind::Mana, 2.0);

        assert_eq!(actor.weighted_value(&template), 5.0 + 8.0 + 1.5);
        assert_eq!(actor.weighted_int(&template), 14);
    }

    #[test]
    fn weighted_int_truncates_toward_zero() {
        let actor = Attributes::ZERO;
        assert_eq!(actor.weighted_int(&Attributes::constant(2.9)), 2);
        assert_eq!(actor.weighted_int(&Attributes::constant(-2.9)), -2);
    }

    #[test]
    fn mana_shortfall_is_reported() {
        let actor = Attributes::resources(100.0, 100.0, 5.0);
        let required = Attributes::ZERO.with(AttributeKind::Mana, 10.0);

        let err = actor.meets(&required).unwrap_err();
        assert_eq!(err.kind, AttributeKind::Mana);
        assert_eq!(err.have, 5.0);
        assert_eq!(err.need, 10.0);
    }

    #[test]
    fn first_failing_component_wins() {
        let actor = Attributes::ZERO;
        let required = Attributes::ZERO
            .with(AttributeKind::Willpower, 1.0)
            .with(AttributeKind::Life, 1.0);

        assert_eq!(
            actor.meets(&required).unwrap_err().kind,
            AttributeKind::Willpower
        );
    }

    #[test]
    fn can_afford_ignores_uncharged_components() {
        let actor = Attributes::resources(10.0, 0.0, 0.0).with(AttributeKind::FireResist, -3.0);
        let cost = Attributes::resources(5.0, 0.0, 0.0);

        assert!(actor.meets(&cost).is_err());
        assert!(actor.can_afford(&cost).is_ok());
        assert!(actor.can_afford(&Attributes::resources(11.0, 0.0, 0.0)).is_err());
    }

    #[test]
    fn kind_names_round_trip_through_strum() {
        use std::str::FromStr;
        assert_eq!(AttributeKind::SlashResist.to_string(), "slash_resist");
        assert_eq!(
            AttributeKind::from_str("Mana").unwrap(),
            AttributeKind::Mana
        );
    }

    proptest! {
        #[test]
        fn zero_template_yields_bias(actor in arb_attributes(), bias in -100i16..100i16) {
            let bias = f32::from(bias);
            prop_assert_eq!(actor.weighted_value(&Attributes::constant(bias)), bias);
        }

        #[test]
        fn weighted_value_is_linear_in_template(
            actor in arb_attributes(),
            a in arb_attributes(),
            b in arb_attributes(),
        ) {
            let sum = actor.weighted_value(&(a + b));
            let parts = actor.weighted_value(&a) + actor.weighted_value(&b);
            prop_assert!((sum - parts).abs() < 1e-2);
        }

        #[test]
        fn meets_iff_every_component_is_at_least_required(
            actor in arb_attributes(),
            required in arb_attributes(),
        ) {
            let expected = AttributeKind::ALL.iter().all(|&k| actor[k] >= required[k]);
            prop_assert_eq!(actor.meets(&required).is_ok(), expected);
        }
    }
}
