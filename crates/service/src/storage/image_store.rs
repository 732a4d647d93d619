use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tokio::fs;
use tracing::{debug, info};

use crate::errors::ServiceError;

/// URL prefix under which the upload directory is served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Product images on disk, one file per product named `<id><ext>`.
///
/// No type, size or content checks happen here; callers decide what to store.
#[derive(Clone, Debug)]
pub struct ImageStore {
    upload_dir: PathBuf,
}

impl ImageStore {
    pub fn new<P: Into<PathBuf>>(upload_dir: P) -> Self {
        Self { upload_dir: upload_dir.into() }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// `<id>` plus the lower-cased extension of `original_filename`, if any.
    pub fn stored_name(id: &str, original_filename: &str) -> String {
        let ext = Path::new(original_filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_ascii_lowercase()))
            .unwrap_or_default();
        format!("{id}{ext}")
    }

    /// Write `bytes` and return the public path (`/uploads/<id><ext>`).
    /// An existing file with the same name is overwritten.
    pub async fn save(&self, id: &str, original_filename: &str, bytes: &[u8]) -> Result<String, ServiceError> {
        let name = Self::stored_name(id, original_filename);
        fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| ServiceError::storage(self.upload_dir.display(), e))?;
        let target = self.upload_dir.join(&name);
        fs::write(&target, bytes)
            .await
            .map_err(|e| ServiceError::storage(target.display(), e))?;
        info!(file = %name, size = bytes.len(), "image_saved");
        Ok(format!("{UPLOADS_URL_PREFIX}/{name}"))
    }

    /// Remove the file behind a public path. Already-absent files, empty paths
    /// and paths outside `/uploads/` are not errors; other I/O failures are.
    pub async fn delete(&self, public_path: &str) -> Result<(), ServiceError> {
        let Some(rest) = public_path
            .strip_prefix(UPLOADS_URL_PREFIX)
            .and_then(|r| r.strip_prefix('/'))
        else {
            return Ok(());
        };
        // only the final component; never walk out of the upload dir
        let Some(name) = Path::new(rest).file_name() else {
            return Ok(());
        };
        let target = self.upload_dir.join(name);
        match fs::remove_file(&target).await {
            Ok(()) => {
                info!(file = %target.display(), "image_deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(file = %target.display(), "image already absent");
                Ok(())
            }
            Err(e) => Err(ServiceError::storage(target.display(), e)),
        }
    }
}
