//! Data model for the site backend.
//!
//! Everything the backend persists lives in one [`document::Document`]; the
//! record types here are shared by the storage, service and HTTP layers.

pub mod errors;
pub mod document;
pub mod site;
pub mod product;
pub mod contact;
mod validate;

pub use contact::{ContactMessage, ContactMessageInput};
pub use document::Document;
pub use product::{Product, ProductInput};
pub use site::SiteContent;

/// Fresh opaque identifier for products and messages.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
