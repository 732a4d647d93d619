use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Json,
};
use service::{
    auth::{
        domain::{IssuedToken, LoginInput},
        AuthService,
    },
    services::{ContactService, ProductService, SiteContentService},
    storage::{DocumentStore, ImageStore},
};

use crate::errors::ApiError;

/// Shared handler state; every service works against the same document store.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService>,
    pub site: SiteContentService,
    pub products: ProductService,
    pub contact: ContactService,
}

impl ServerState {
    pub fn new(store: Arc<dyn DocumentStore>, images: ImageStore, auth: Arc<AuthService>) -> Self {
        Self {
            auth,
            site: SiteContentService::new(store.clone()),
            products: ProductService::new(store.clone(), images),
            contact: ContactService::new(store),
        }
    }
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In", body = crate::openapi::LoginResponse), (status = 401, description = "Unauthorized", body = crate::openapi::ErrorResponse)))]
pub async fn login(
    State(state): State<ServerState>,
    input: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<IssuedToken>, ApiError> {
    let Json(input) = input?;
    let token = state.auth.login(input).await?;
    Ok(Json(token))
}

/// Route middleware for admin-only endpoints: `Authorization: Bearer <token>`
/// must carry a valid, unexpired token for the admin. Rejections never reach
/// the handler, so nothing is read or written.
pub async fn require_admin(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authz = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if let Err(e) = state.auth.require_admin(authz) {
        tracing::warn!(method = %req.method(), path = %req.uri().path(), code = e.code(), "admin request rejected");
        return Err(e.into());
    }
    Ok(next.run(req).await)
}
