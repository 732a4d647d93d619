use std::sync::Arc;

use models::SiteContent;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::storage::DocumentStore;

#[derive(Clone)]
pub struct SiteContentService {
    store: Arc<dyn DocumentStore>,
}

impl SiteContentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self) -> Result<SiteContent, ServiceError> {
        Ok(self.store.read().await?.site)
    }

    /// Overwrite the whole site section; fields left out of `content` become blank.
    #[instrument(skip_all, fields(brand_name = %content.brand_name))]
    pub async fn replace(&self, content: SiteContent) -> Result<SiteContent, ServiceError> {
        let mut doc = self.store.read().await?;
        doc.site = content;
        self.store.write(&doc).await?;
        info!("site_content_replaced");
        Ok(doc.site)
    }
}
