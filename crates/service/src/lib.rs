//! Service layer for the site backend.
//! - `storage`: the whole-document JSON store and the product image store.
//! - `auth`: single-admin login and bearer token verification.
//! - `services`: site content, product and contact operations built on the store.

pub mod errors;
pub mod auth;
pub mod runtime;
pub mod storage;
pub mod services;
