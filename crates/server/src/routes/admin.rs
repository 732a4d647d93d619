use axum::{extract::State, Json};
use models::ContactMessage;

use super::auth::ServerState;
use crate::errors::ApiError;

/// 列出全部联系消息（按提交顺序）
#[utoipa::path(get, path = "/admin/messages", tag = "admin", security(("bearer" = [])), responses((status = 200, description = "All contact messages", body = [crate::openapi::ContactMessageDoc]), (status = 401, description = "Unauthorized", body = crate::openapi::ErrorResponse)))]
pub async fn list_messages(State(state): State<ServerState>) -> Result<Json<Vec<ContactMessage>>, ApiError> {
    Ok(Json(state.contact.list_all().await?))
}
