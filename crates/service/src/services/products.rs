use std::sync::Arc;

use models::{Product, ProductInput};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::storage::{DocumentStore, ImageStore};

/// An uploaded image as received from the client.
#[derive(Clone, Debug)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Product catalog. Images are stored through the [`ImageStore`] under the
/// product's id.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn DocumentStore>,
    images: ImageStore,
}

impl ProductService {
    pub fn new(store: Arc<dyn DocumentStore>, images: ImageStore) -> Self {
        Self { store, images }
    }

    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.store.read().await?.products)
    }

    #[instrument(skip_all, fields(name = %input.name, with_image = image.is_some()))]
    pub async fn create(&self, input: ProductInput, image: Option<ImageUpload>) -> Result<Product, ServiceError> {
        let input = input.validated()?;
        let mut doc = self.store.read().await?;

        let id = models::new_id();
        let image_path = match image {
            Some(img) => self.images.save(&id, &img.filename, &img.bytes).await?,
            None => String::new(),
        };
        let product = Product { id, name: input.name, description: input.description, image_path };
        doc.products.push(product.clone());
        self.store.write(&doc).await?;
        info!(id = %product.id, "product_created");
        Ok(product)
    }

    /// Overwrite name and description; the image only changes when a new one
    /// is supplied. A replaced image with a different extension leaves the old
    /// file on disk.
    #[instrument(skip_all, fields(id = %id, with_image = image.is_some()))]
    pub async fn update(&self, id: &str, input: ProductInput, image: Option<ImageUpload>) -> Result<Product, ServiceError> {
        let input = input.validated()?;
        let mut doc = self.store.read().await?;
        let product = doc.product_mut(id).ok_or_else(|| ServiceError::not_found("Product"))?;

        product.name = input.name;
        product.description = input.description;
        if let Some(img) = image {
            product.image_path = self.images.save(id, &img.filename, &img.bytes).await?;
        }
        let updated = product.clone();
        self.store.write(&doc).await?;
        info!("product_updated");
        Ok(updated)
    }

    /// Remove the product, then its image file if one is still there.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn delete(&self, id: &str) -> Result<String, ServiceError> {
        let mut doc = self.store.read().await?;
        let removed = doc.take_product(id).ok_or_else(|| ServiceError::not_found("Product"))?;
        self.store.write(&doc).await?;
        self.images.delete(&removed.image_path).await?;
        info!("product_deleted");
        Ok(removed.id)
    }
}
