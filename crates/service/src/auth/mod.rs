//! Auth module: single-admin login and stateless bearer tokens.
//!
//! Tokens are HS256 JWTs carrying `sub`, `iat` and `exp`; nothing about a
//! session is stored server side, so a token stays valid for its whole TTL
//! as long as the signing secret is unchanged.

pub mod domain;
pub mod errors;
pub mod service;

pub use errors::AuthError;
pub use service::{AdminCredentials, AuthConfig, AuthService};
