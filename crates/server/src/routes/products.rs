use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    Json,
};
use models::{Product, ProductInput};
use serde_json::{json, Value};
use service::services::ImageUpload;

use super::auth::ServerState;
use crate::errors::ApiError;

/// Parsed `multipart/form-data` product form.
#[derive(Debug)]
struct ProductForm {
    input: ProductInput,
    image: Option<ImageUpload>,
}

async fn read_form(multipart: Result<Multipart, MultipartRejection>) -> Result<ProductForm, ApiError> {
    let mut multipart = multipart?;
    let (mut name, mut description, mut image) = (None, None, None);

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => name = Some(field.text().await?),
            "description" => description = Some(field.text().await?),
            "image" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                // browsers send an empty part when no file was picked
                if !(filename.is_empty() && bytes.is_empty()) {
                    image = Some(ImageUpload { filename, bytes: bytes.to_vec() });
                }
            }
            other => tracing::debug!(field = %other, "ignoring unknown form field"),
        }
    }

    let name = name.ok_or_else(|| ApiError::validation("name is required"))?;
    let description = description.ok_or_else(|| ApiError::validation("description is required"))?;
    Ok(ProductForm { input: ProductInput { name, description }, image })
}

#[utoipa::path(get, path = "/products", tag = "products", responses((status = 200, description = "All products", body = [crate::openapi::ProductDoc])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.list().await?))
}

#[utoipa::path(post, path = "/products", tag = "products", request_body(content = crate::openapi::ProductFormDoc, content_type = "multipart/form-data"), security(("bearer" = [])), responses((status = 200, description = "Created", body = crate::openapi::ProductDoc), (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponse), (status = 401, description = "Unauthorized", body = crate::openapi::ErrorResponse)))]
pub async fn create(
    State(state): State<ServerState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Product>, ApiError> {
    let form = read_form(multipart).await?;
    Ok(Json(state.products.create(form.input, form.image).await?))
}

#[utoipa::path(put, path = "/products/{id}", tag = "products", params(("id" = String, Path, description = "Product id")), request_body(content = crate::openapi::ProductFormDoc, content_type = "multipart/form-data"), security(("bearer" = [])), responses((status = 200, description = "Updated", body = crate::openapi::ProductDoc), (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Product>, ApiError> {
    let form = read_form(multipart).await?;
    Ok(Json(state.products.update(&id, form.input, form.image).await?))
}

#[utoipa::path(delete, path = "/products/{id}", tag = "products", params(("id" = String, Path, description = "Product id")), security(("bearer" = [])), responses((status = 200, description = "Deleted", body = crate::openapi::DeletedResponse), (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let deleted = state.products.delete(&id).await?;
    Ok(Json(json!({ "deleted": deleted })))
}
