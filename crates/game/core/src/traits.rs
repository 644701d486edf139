//! Faction identity and the friendliness table.
//!
//! Every actor on the map belongs to exactly one faction. The AI never reasons
//! about factions directly; it asks for the [`Alignment`] of an observed actor
//! relative to the observer and scores effects into the matching bucket.

/// Allegiance of a player or monster.
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
pub enum Faction {
    Player,
    /// Default dungeon population.
    #[default]
    Monster,
    Outlaw,
    Horror,
    /// Player-aligned NPC order.
    Templar,
    /// Ignored by combat targeting and effect scoring.
    Neutral,
}

impl Faction {
    /// Returns true when `self` treats `other` as an ally.
    ///
    /// The relation is not symmetric for [`Faction::Neutral`]: a neutral
    /// observer is friendly to everyone, while everyone sees a neutral actor
    /// as [`Alignment::Neutral`].
    pub fn is_friendly(self, other: Faction) -> bool {
        use Faction::*;

        if self == other {
            return true;
        }
        match self {
            Neutral => true,
            Monster => matches!(other, Outlaw | Horror),
            Outlaw | Horror => other == Monster,
            Player => other == Templar,
            Templar => other == Player,
        }
    }

    /// Classifies `observed` from the point of view of `self`.
    pub fn alignment_of(self, observed: Faction) -> Alignment {
        if observed == Faction::Neutral {
            Alignment::Neutral
        } else if self.is_friendly(observed) {
            Alignment::Friendly
        } else {
            Alignment::Hostile
        }
    }
}

/// Relation of an observed actor to the deciding monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Alignment {
    Friendly,
    Hostile,
    Neutral,
}
