//! Resource services. Each operation is one full read -> mutate -> write
//! round trip against the [`DocumentStore`](crate::storage::DocumentStore).
//! Admin gating happens in front of these calls, not inside them.

pub mod site_content;
pub mod products;
pub mod contact;

pub use contact::ContactService;
pub use products::{ImageUpload, ProductService};
pub use site_content::SiteContentService;
