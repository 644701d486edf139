//! Behaviour profile loader.
//!
//! Loads scoring weights keyed by algorithm tag from RON files. The runtime
//! merges the result over its built-in presets.

use std::collections::HashMap;
use std::path::Path;

use game_core::BotConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for per-algorithm [`BotConfig`] overrides.
///
/// File format: HashMap<String, BotConfig>
///
/// Example:
/// ```ron
/// {
///     "berserker": (aggression: 9.0, preservation: 0.5),
///     "default": (randomness: 0.05),
/// }
/// ```
///
/// Fields left out of an entry take the [`BotConfig`] defaults.
pub struct ProfileLoader;

impl ProfileLoader {
    pub fn load(path: &Path) -> LoadResult<HashMap<String, BotConfig>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse profile RON at {:?}: {}", path, e))
    }

    pub fn parse(content: &str) -> LoadResult<HashMap<String, BotConfig>> {
        let raw: HashMap<String, BotConfig> = ron::from_str(content)?;

        // Tags are matched case-insensitively by the runtime.
        Ok(raw
            .into_iter()
            .map(|(tag, config)| (tag.to_ascii_lowercase(), config))
            .collect())
    }
}
