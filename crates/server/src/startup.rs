use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, auth::ServerState, HttpSettings};
use service::{
    auth::{AdminCredentials, AuthConfig, AuthService},
    runtime,
    storage::{ImageStore, JsonFileStore},
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Admin identity from config; a PHC hash wins over a plaintext password.
fn admin_credentials(cfg: &configs::AuthConfig) -> anyhow::Result<AdminCredentials> {
    let creds = match (&cfg.admin_password_hash, &cfg.admin_password) {
        (Some(hash), _) => AdminCredentials::from_hash(&cfg.admin_username, hash.as_str())?,
        (None, Some(password)) => AdminCredentials::from_plaintext(&cfg.admin_username, password)?,
        (None, None) => anyhow::bail!("admin password or password hash must be configured"),
    };
    Ok(creds)
}

/// Stores and services for a validated config.
pub fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let store = JsonFileStore::new(&cfg.storage.data_path);
    let images = ImageStore::new(&cfg.storage.upload_dir);
    let auth = AuthService::new(AuthConfig {
        jwt_secret: cfg.auth.jwt_secret.clone(),
        admin: admin_credentials(&cfg.auth)?,
    });
    Ok(ServerState::new(store, images, Arc::new(auth)))
}

pub fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let state = build_state(cfg)?;
    let settings = HttpSettings {
        upload_dir: cfg.storage.upload_dir.clone(),
        static_dir: cfg.storage.static_dir.clone(),
        max_body_bytes: cfg.storage.max_upload_bytes,
    };
    Ok(routes::build_router(state, build_cors(), &settings))
}

/// Public entry: prepare directories, build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    runtime::ensure_env(&cfg.storage.data_path, &cfg.storage.upload_dir, cfg.storage.static_dir.as_deref()).await?;

    let app = build_app(&cfg)?;

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(cfg.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(%addr, data_path = %cfg.storage.data_path.display(), "http server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
