//! Input files shared by the commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use game_content::{ConfigLoader, SnapshotLoader};
use game_core::{EngineConfig, GameSnapshot};
use runtime::BehaviorRegistry;

#[derive(Args)]
pub struct Inputs {
    /// Recorded tick snapshot (JSON)
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Engine configuration (TOML); defaults apply when omitted
    #[arg(short, long, value_name = "FILE", env = "DUNGEON_AI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Behaviour profiles (RON) merged over the built-in presets
    #[arg(short, long, value_name = "FILE", env = "DUNGEON_AI_PROFILES")]
    pub profiles: Option<PathBuf>,
}

impl Inputs {
    pub fn engine(&self) -> Result<EngineConfig> {
        match &self.config {
            Some(path) => ConfigLoader::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display())),
            None => Ok(EngineConfig::default()),
        }
    }

    pub fn behaviors(&self) -> Result<BehaviorRegistry> {
        match &self.profiles {
            Some(path) => Ok(BehaviorRegistry::load(path)?),
            None => Ok(BehaviorRegistry::with_presets()),
        }
    }

    pub fn snapshot(&self) -> Result<GameSnapshot> {
        SnapshotLoader::load(&self.snapshot)
    }
}
