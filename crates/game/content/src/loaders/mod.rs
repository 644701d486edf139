//! Content loaders for reading engine inputs from files.

pub mod config;
pub mod profiles;
pub mod snapshot;

pub use config::ConfigLoader;
pub use profiles::ProfileLoader;
pub use snapshot::SnapshotLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
