//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the server crate can prepare
//! directories through the service layer.

use std::path::Path;

/// Ensure the data and upload directories exist; warn on a missing static dir.
pub async fn ensure_env(data_path: &Path, upload_dir: &Path, static_dir: Option<&Path>) -> anyhow::Result<()> {
    common::env::ensure_env(data_path, upload_dir, static_dir).await
}
