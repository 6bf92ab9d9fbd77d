//! Location of the local Gem cache.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use gemdex_store::FileStore;

/// Resolve the cache directory: `--store`/`GEMDEX_STORE`, else the
/// platform data directory.
fn store_root(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(root) = explicit {
        return Ok(root);
    }

    let dirs =
        ProjectDirs::from("", "", "gemdex").context("Could not determine data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Open the file-backed cache. Nothing is created until the first write.
pub fn open(explicit: Option<PathBuf>) -> Result<Arc<FileStore>> {
    let root = store_root(explicit)?;
    debug!(root = %root.display(), "Using cache directory");
    Ok(Arc::new(FileStore::new(root)))
}
