//! Platform-specific directory utilities
//!
//! Provides consistent directory paths across different operating systems,
//! following platform conventions for cache directories.

use std::path::PathBuf;

/// Get the platform-specific log directory for the monster AI tools
///
/// Follows platform conventions:
/// - macOS: `~/Library/Caches/dungeon-ai/logs`
/// - Linux: `~/.cache/dungeon-ai/logs` (or `$XDG_CACHE_HOME/dungeon-ai/logs`)
/// - Windows: `%LOCALAPPDATA%\dungeon-ai\logs`
/// - Fallback: `/tmp/dungeon-ai/logs`
///
/// `DUNGEON_AI_LOG_DIR` overrides all of the above.
pub fn log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DUNGEON_AI_LOG_DIR") {
        return PathBuf::from(dir);
    }

    directories::ProjectDirs::from("", "", "dungeon-ai")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/dungeon-ai"))
        .join("logs")
}
