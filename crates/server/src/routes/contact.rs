use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use models::{ContactMessage, ContactMessageInput};

use super::auth::ServerState;
use crate::errors::ApiError;

#[utoipa::path(post, path = "/contact", tag = "contact", request_body = crate::openapi::ContactRequest, responses((status = 200, description = "Stored message", body = crate::openapi::ContactMessageDoc), (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponse)))]
pub async fn submit(
    State(state): State<ServerState>,
    body: Result<Json<ContactMessageInput>, JsonRejection>,
) -> Result<Json<ContactMessage>, ApiError> {
    let Json(input) = body?;
    Ok(Json(state.contact.submit(input).await?))
}
