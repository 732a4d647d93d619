#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use argon2::{Algorithm, Argon2, Params, Version};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use serde_json::Value;
use service::auth::{AdminCredentials, AuthConfig, AuthService};
use service::storage::{ImageStore, JsonFileStore};
use tower::ServiceExt;
use uuid::Uuid;

use server::routes::{self, auth::ServerState, HttpSettings};

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "Sup3rSecret";
pub const JWT_SECRET: &str = "test-secret";
const BOUNDARY: &str = "----p2gtestboundary";

/// One router over a private temp directory, removed on drop.
pub struct TestApp {
    pub router: Router,
    pub auth: Arc<AuthService>,
    pub root: PathBuf,
    pub data_path: PathBuf,
    pub upload_dir: PathBuf,
}

impl TestApp {
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!("p2g_site_test_{}", Uuid::new_v4()));
        let data_path = root.join("data").join("data.json");
        let upload_dir = root.join("uploads");
        std::fs::create_dir_all(&upload_dir).unwrap();

        let argon = Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::new(1024, 1, 1, None).unwrap());
        let admin = AdminCredentials::hash_with(&argon, ADMIN_USER, ADMIN_PASSWORD).unwrap();
        let auth = Arc::new(AuthService::new(AuthConfig { jwt_secret: JWT_SECRET.into(), admin }));

        let state = ServerState::new(JsonFileStore::new(&data_path), ImageStore::new(&upload_dir), auth.clone());
        let settings = HttpSettings { upload_dir: upload_dir.clone(), static_dir: None, max_body_bytes: 1024 * 1024 };
        let router = routes::build_router(state, tower_http::cors::CorsLayer::very_permissive(), &settings);
        Self { router, auth, root, data_path, upload_dir }
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    pub async fn send_json(&self, req: Request<Body>) -> (StatusCode, Value) {
        let (status, bytes) = self.send(req).await;
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, value)
    }

    /// Token for `subject` signed with the app's secret.
    pub fn token_for(&self, subject: &str, issued_at: DateTime<Utc>) -> String {
        self.auth.issue_token_at(subject, issued_at).unwrap()
    }

    pub fn admin_token(&self) -> String {
        self.token_for(ADMIN_USER, Utc::now())
    }

    /// Raw persisted document, if it has been written.
    pub fn data_snapshot(&self) -> Option<String> {
        std::fs::read_to_string(&self.data_path).ok()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, bearer(t));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, bearer(t));
    }
    builder.body(Body::empty()).unwrap()
}

/// `multipart/form-data` request with text fields and an optional `image` part.
pub fn multipart_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    fields: &[(&str, &str)],
    image: Option<(&str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n").as_bytes(),
        );
    }
    if let Some((filename, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"));
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, bearer(t));
    }
    builder.body(Body::from(body)).unwrap()
}
