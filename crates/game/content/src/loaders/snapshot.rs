//! Recorded tick snapshot loader.

use std::path::Path;

use game_core::GameSnapshot;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`GameSnapshot`] JSON files.
///
/// Snapshots are validated after parsing so that a level with zero
/// dimensions is rejected here rather than producing an empty field later.
pub struct SnapshotLoader;

impl SnapshotLoader {
    pub fn load(path: &Path) -> LoadResult<GameSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid snapshot {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<GameSnapshot> {
        let snapshot: GameSnapshot = serde_json::from_str(content)?;
        for level in &snapshot.levels {
            level.validate()?;
        }
        Ok(snapshot)
    }

    /// Serialises a snapshot in the same format [`Self::load`] reads.
    pub fn save(path: &Path, snapshot: &GameSnapshot) -> LoadResult<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(path, json)
            .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
    }
}
