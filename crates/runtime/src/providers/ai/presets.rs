//! Behaviour presets keyed by algorithm tag.
//!
//! Every monster names an algorithm in the snapshot. The tag selects the
//! scoring weights the decision engine uses for it:
//!
//! ```text
//! tag          aggression  preservation  support  restlessness  randomness
//! default          4            2           1           7           0.03
//! aggressive       6            1           0.5         9           0.05
//! defensive        2            4           1.5         3           0.03
//! support          2            2           4           5           0.03
//! coward           1            6           1           2           0.02
//! ```
//!
//! `none` and `no_behavior` switch the AI off for that monster. Profiles
//! loaded from disk are merged over the table above and may add new tags.
//!
//! # Usage
//!
//! ```rust,ignore
//! let profiles = ProfileLoader::load(Path::new("profiles.ron"))?;
//! let registry = BehaviorRegistry::with_presets().with_profiles(profiles);
//! ```

use std::collections::HashMap;
use std::path::Path;

use game_content::ProfileLoader;
use game_core::BotConfig;

use crate::api::{Result, RuntimeError};

/// Resolved behaviour of one monster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Behavior {
    /// Run the decision engine with these weights.
    Scored(BotConfig),
    /// Emit nothing.
    Disabled,
}

/// Tags that disable the AI.
pub const DISABLED_TAGS: [&str; 2] = ["none", "no_behavior"];

pub fn default_profile() -> BotConfig {
    BotConfig::default()
}

pub fn aggressive() -> BotConfig {
    BotConfig::new(6.0, 1.0, 0.5, 9.0, 0.05)
}

pub fn defensive() -> BotConfig {
    BotConfig::new(2.0, 4.0, 1.5, 3.0, 0.03)
}

pub fn support() -> BotConfig {
    BotConfig::new(2.0, 2.0, 4.0, 5.0, 0.03)
}

/// Keeps its distance and heals itself.
pub fn coward() -> BotConfig {
    BotConfig::new(1.0, 6.0, 1.0, 2.0, 0.02)
}

/// Lookup table from algorithm tag to [`Behavior`].
#[derive(Clone, Debug)]
pub struct BehaviorRegistry {
    profiles: HashMap<String, BotConfig>,
}

impl BehaviorRegistry {
    pub const DEFAULT_TAG: &'static str = "default";

    /// Registry holding the built-in presets.
    pub fn with_presets() -> Self {
        let profiles = [
            (Self::DEFAULT_TAG, default_profile()),
            ("aggressive", aggressive()),
            ("defensive", defensive()),
            ("support", support()),
            ("coward", coward()),
        ]
        .into_iter()
        .map(|(tag, config)| (tag.to_owned(), config))
        .collect();

        Self { profiles }
    }

    /// Merges loaded profiles over the current table.
    #[must_use]
    pub fn with_profiles(mut self, profiles: HashMap<String, BotConfig>) -> Self {
        for (tag, config) in profiles {
            self.profiles.insert(tag.to_ascii_lowercase(), config);
        }
        self
    }

    /// Presets merged with the profiles in a RON file.
    pub fn load(path: &Path) -> Result<Self> {
        let profiles = ProfileLoader::load(path).map_err(RuntimeError::Content)?;
        tracing::info!("Loaded {} behavior profiles from {:?}", profiles.len(), path);
        Ok(Self::with_presets().with_profiles(profiles))
    }

    /// Resolves `tag`, falling back to the default profile for unknown tags.
    ///
    /// An empty tag means "default" and is not reported.
    pub fn resolve(&self, tag: &str) -> Behavior {
        let tag = tag.trim().to_ascii_lowercase();
        if DISABLED_TAGS.contains(&tag.as_str()) {
            return Behavior::Disabled;
        }
        if let Some(config) = self.profiles.get(&tag) {
            return Behavior::Scored(*config);
        }
        if !tag.is_empty() {
            tracing::warn!("Unknown algorithm tag {:?}, using default profile", tag);
        }
        Behavior::Scored(self.default_config())
    }

    fn default_config(&self) -> BotConfig {
        self.profiles
            .get(Self::DEFAULT_TAG)
            .copied()
            .unwrap_or_default()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}

impl Default for BehaviorRegistry {
    fn default() -> Self {
        Self::with_presets()
    }
}
