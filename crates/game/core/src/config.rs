//! Tunable weights and engine parameters.

/// Per-monster scoring weights. Constant for a session.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BotConfig {
    /// Weight of damage dealt to hostiles.
    pub aggression: f32,
    /// Weight of effects on the monster itself.
    pub preservation: f32,
    /// Weight of effects on allies.
    pub support: f32,
    /// Drive to wander; scales the distance-travelled movement term.
    pub restlessness: f32,
    /// Weight of the uniform jitter added to every candidate.
    pub randomness: f32,
}

impl BotConfig {
    pub const DEFAULT_AGGRESSION: f32 = 4.0;
    pub const DEFAULT_PRESERVATION: f32 = 2.0;
    pub const DEFAULT_SUPPORT: f32 = 1.0;
    pub const DEFAULT_RESTLESSNESS: f32 = 7.0;
    pub const DEFAULT_RANDOMNESS: f32 = 0.03;

    pub const fn new(
        aggression: f32,
        preservation: f32,
        support: f32,
        restlessness: f32,
        randomness: f32,
    ) -> Self {
        Self {
            aggression,
            preservation,
            support,
            restlessness,
            randomness,
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_AGGRESSION,
            Self::DEFAULT_PRESERVATION,
            Self::DEFAULT_SUPPORT,
            Self::DEFAULT_RESTLESSNESS,
            Self::DEFAULT_RANDOMNESS,
        )
    }
}

/// Engine-wide parameters shared by every decision.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Base seed mixed into every per-decision RNG.
    pub seed: u64,
    /// Attach human readable status strings to commands.
    pub announce_status: bool,
    /// Maximum BFS distance at which the fallback chases a hostile.
    pub chase_distance: u32,
    /// Ticks after taking damage during which out-of-combat skills stay locked.
    pub out_of_combat_turns: u32,
    /// Ticks a stretched movement target is pursued before it is dropped.
    pub move_target_timeout: u32,
    /// Multiplier applied to a movement step to project a far target.
    pub stretch_factor: i32,
    /// Decide monsters of a level on scoped worker threads.
    pub parallel: bool,
}

impl EngineConfig {
    pub const DEFAULT_SEED: u64 = 0;
    pub const DEFAULT_CHASE_DISTANCE: u32 = 12;
    pub const DEFAULT_OUT_OF_COMBAT_TURNS: u32 = 2;
    pub const DEFAULT_MOVE_TARGET_TIMEOUT: u32 = 6;
    pub const DEFAULT_STRETCH_FACTOR: i32 = 8;

    pub fn new() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            announce_status: true,
            chase_distance: Self::DEFAULT_CHASE_DISTANCE,
            out_of_combat_turns: Self::DEFAULT_OUT_OF_COMBAT_TURNS,
            move_target_timeout: Self::DEFAULT_MOVE_TARGET_TIMEOUT,
            stretch_factor: Self::DEFAULT_STRETCH_FACTOR,
            parallel: true,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
