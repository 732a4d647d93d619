use std::sync::Arc;

use models::{ContactMessage, ContactMessageInput};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::storage::DocumentStore;

/// Inbound contact messages: public append, admin listing.
#[derive(Clone)]
pub struct ContactService {
    store: Arc<dyn DocumentStore>,
}

impl ContactService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    #[instrument(skip_all, fields(message_type = %input.message_type))]
    pub async fn submit(&self, input: ContactMessageInput) -> Result<ContactMessage, ServiceError> {
        let input = input.validated()?;
        let mut doc = self.store.read().await?;
        let message = input.into_message(models::new_id());
        doc.messages.push(message.clone());
        self.store.write(&doc).await?;
        info!(id = %message.id, "contact_message_received");
        Ok(message)
    }

    /// All messages in submission order.
    pub async fn list_all(&self) -> Result<Vec<ContactMessage>, ServiceError> {
        Ok(self.store.read().await?.messages)
    }
}
