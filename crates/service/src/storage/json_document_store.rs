use std::{
    ffi::OsString,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use models::Document;
use tokio::fs;
use tracing::debug;

use super::DocumentStore;
use crate::errors::ServiceError;

/// JSON file-backed document store.
///
/// Every write serializes the whole document (pretty-printed, two-space
/// indent) to its own sibling `<name>.<uuid>.tmp` file and renames it over
/// the target, so a reader never sees a half-written file. Overlapping
/// writers never share a temp file; the last rename wins. There is no
/// in-process cache and no lock: each `read` goes to disk.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
}

impl JsonFileStore {
    /// The file does not need to exist yet; the first `write` creates it.
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { file_path: path.into() })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Fresh temp path next to the data file, unique per write.
    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.file_path.as_os_str());
        name.push(format!(".{}.tmp", uuid::Uuid::new_v4().simple()));
        PathBuf::from(name)
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn read(&self) -> Result<Document, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "data file absent; using defaults");
                return Ok(Document::default());
            }
            Err(e) => return Err(ServiceError::storage(self.file_path.display(), e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Document::default());
        }
        serde_json::from_slice(&bytes).map_err(|e| ServiceError::storage(self.file_path.display(), e))
    }

    async fn write(&self, doc: &Document) -> Result<(), ServiceError> {
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::storage(parent.display(), e))?;
        }
        let mut data = serde_json::to_vec_pretty(doc).map_err(|e| ServiceError::storage("serialize document", e))?;
        data.push(b'\n');

        let tmp = self.tmp_path();
        fs::write(&tmp, data).await.map_err(|e| ServiceError::storage(tmp.display(), e))?;
        if let Err(e) = fs::rename(&tmp, &self.file_path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::storage(self.file_path.display(), e));
        }
        debug!(path = %self.file_path.display(), products = doc.products.len(), messages = doc.messages.len(), "document written");
        Ok(())
    }
}
