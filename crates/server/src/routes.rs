use std::path::PathBuf;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::storage::image_store::UPLOADS_URL_PREFIX;

use crate::openapi;

pub mod admin;
pub mod auth;
pub mod contact;
pub mod products;
pub mod site;

use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Filesystem and size settings the router needs besides the services.
#[derive(Clone, Debug)]
pub struct HttpSettings {
    pub upload_dir: PathBuf,
    pub static_dir: Option<PathBuf>,
    pub max_body_bytes: usize,
}

/// Build the full application router: public routes, admin routes, uploads, and
/// the optional static frontend.
pub fn build_router(state: ServerState, cors: CorsLayer, settings: &HttpSettings) -> Router {
    // Public routes
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .route("/auth/login", post(auth::login))
        .route("/site", get(site::get_site))
        .route("/products", get(products::list))
        .route("/contact", post(contact::submit))
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(&settings.upload_dir));

    // Admin routes; same paths as public ones merge per method
    let admin_routes = Router::new()
        .route("/site", put(site::update_site))
        .route("/products", post(products::create))
        .route("/products/:id", put(products::update).delete(products::delete))
        .route("/admin/messages", get(admin::list_messages))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_admin));

    let mut app = public.merge(admin_routes);
    if let Some(dir) = &settings.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    // Compose
    app.with_state(state)
        .layer(DefaultBodyLimit::max(settings.max_body_bytes))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
