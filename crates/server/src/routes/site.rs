use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use models::SiteContent;

use super::auth::ServerState;
use crate::errors::ApiError;

#[utoipa::path(get, path = "/site", tag = "site", responses((status = 200, description = "Site content", body = crate::openapi::SiteContentDoc)))]
pub async fn get_site(State(state): State<ServerState>) -> Result<Json<SiteContent>, ApiError> {
    Ok(Json(state.site.get().await?))
}

#[utoipa::path(put, path = "/site", tag = "site", request_body = crate::openapi::SiteContentDoc, security(("bearer" = [])), responses((status = 200, description = "Replaced", body = crate::openapi::SiteContentDoc), (status = 401, description = "Unauthorized", body = crate::openapi::ErrorResponse)))]
pub async fn update_site(
    State(state): State<ServerState>,
    body: Result<Json<SiteContent>, JsonRejection>,
) -> Result<Json<SiteContent>, ApiError> {
    let Json(content) = body?;
    Ok(Json(state.site.replace(content).await?))
}
