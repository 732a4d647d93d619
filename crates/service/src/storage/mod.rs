//! Storage abstractions for the service layer
//!
//! All application state is one [`Document`]; services persist it with a
//! full read -> mutate -> write round trip. No call here serializes
//! concurrent writers: two overlapping round trips lose the first write.

use async_trait::async_trait;
use models::Document;

use crate::errors::ServiceError;

pub mod json_document_store;
pub mod memory_store;
pub mod image_store;

pub use image_store::ImageStore;
pub use json_document_store::JsonFileStore;
pub use memory_store::MemoryStore;

/// Whole-document persistence.
/// Implementations can be file-backed, in-memory, or remote KV.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Full document; absent storage or missing sections read as defaults.
    async fn read(&self) -> Result<Document, ServiceError>;
    /// Replace the stored document entirely.
    async fn write(&self, doc: &Document) -> Result<(), ServiceError>;
}
