use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use models::Document;
use tokio::sync::RwLock;

use super::DocumentStore;
use crate::errors::ServiceError;

/// In-process document store for tests and examples.
#[derive(Default)]
pub struct MemoryStore {
    doc: RwLock<Document>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn with_document(doc: Document) -> Self {
        Self { doc: RwLock::new(doc), writes: AtomicUsize::new(0) }
    }

    /// Number of completed `write` calls.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn read(&self) -> Result<Document, ServiceError> {
        Ok(self.doc.read().await.clone())
    }

    async fn write(&self, doc: &Document) -> Result<(), ServiceError> {
        *self.doc.write().await = doc.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::ContactMessage;

    fn msg(id: &str) -> ContactMessage {
        ContactMessage {
            id: id.into(),
            name: "N".into(),
            email: "n@e.com".into(),
            message_type: "where_to_buy".into(),
            message: "hello there".into(),
        }
    }

    // Two overlapping read-mutate-write cycles: the later write wins.
    #[tokio::test]
    async fn overlapping_round_trips_lose_first_update() -> Result<(), anyhow::Error> {
        let store = MemoryStore::default();
        let mut first = store.read().await?;
        let mut second = store.read().await?;

        first.messages.push(msg("a"));
        second.messages.push(msg("b"));
        store.write(&first).await?;
        store.write(&second).await?;

        let ids: Vec<_> = store.read().await?.messages.into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["b".to_string()]);
        assert_eq!(store.writes(), 2);
        Ok(())
    }
}
