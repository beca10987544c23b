use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::info;

#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Recursively deletes each directory. A directory that is already gone
/// counts as removed.
pub async fn purge(dirs: &[&Path]) -> Result<(), CleanupError> {
    for dir in dirs {
        match fs::remove_dir_all(dir).await {
            Ok(()) => info!("🧹 Removed {}", dir.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(source) => {
                return Err(CleanupError::Remove {
                    path: dir.to_path_buf(),
                    source,
                });
            }
        }
    }
    Ok(())
}
