use serde::{Deserialize, Serialize};

use crate::contact::ContactMessage;
use crate::product::Product;
use crate::site::SiteContent;

/// The whole persisted state. Absent top-level keys fall back to their
/// defaults on read; present-but-empty sections are kept as they are.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Document {
    pub site: SiteContent,
    pub products: Vec<Product>,
    pub messages: Vec<ContactMessage>,
}

impl Document {
    pub fn product_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// Remove the product with `id`, returning it if it existed.
    pub fn take_product(&mut self, id: &str) -> Option<Product> {
        let idx = self.products.iter().position(|p| p.id == id)?;
        Some(self.products.remove(idx))
    }
}
