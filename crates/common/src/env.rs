//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Create the data file's parent directory and the upload directory.
/// A configured static directory that does not exist only produces a warning.
pub async fn ensure_env(data_path: &Path, upload_dir: &Path, static_dir: Option<&Path>) -> anyhow::Result<()> {
    if let Some(dir) = static_dir {
        if tokio::fs::metadata(dir).await.is_err() {
            warn!(static_dir = %dir.display(), "static assets directory not found; frontend routes will 404");
        }
    }
    if let Some(parent) = data_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", upload_dir.display()))?;
    info!(data_path = %data_path.display(), upload_dir = %upload_dir.display(), "runtime directories ready");
    Ok(())
}
