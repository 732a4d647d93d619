use std::collections::BTreeMap;

use axum::Json;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    /// Always `bearer`.
    pub token_type: String,
    /// RFC 3339 expiry time.
    pub expires_at: String,
}

#[derive(ToSchema)]
pub struct SiteContentDoc {
    pub brand_name: String,
    pub tagline: String,
    pub hero_note: String,
    pub about_title: String,
    pub about_body: String,
    pub contact_title: String,
    pub contact_note: String,
    pub socials: BTreeMap<String, String>,
}

#[derive(ToSchema)]
pub struct ProductDoc {
    pub id: String,
    pub name: String,
    pub description: String,
    /// `/uploads/<id><ext>`, empty when the product has no image.
    pub image_path: String,
}

/// Multipart form; `image` is an optional file part.
#[derive(ToSchema)]
pub struct ProductFormDoc {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
}

#[derive(ToSchema)]
pub struct DeletedResponse { pub deleted: String }

#[derive(ToSchema)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    /// Defaults to `where_to_buy`.
    pub message_type: Option<String>,
    pub message: String,
}

#[derive(ToSchema)]
pub struct ContactMessageDoc {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message_type: String,
    pub message: String,
}

#[derive(ToSchema)]
pub struct ErrorResponse { pub error: String, pub detail: String }

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::site::get_site,
        crate::routes::site::update_site,
        crate::routes::products::list,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::delete,
        crate::routes::contact::submit,
        crate::routes::admin::list_messages,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            LoginResponse,
            SiteContentDoc,
            ProductDoc,
            ProductFormDoc,
            DeletedResponse,
            ContactRequest,
            ContactMessageDoc,
            ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "site"),
        (name = "products"),
        (name = "contact"),
        (name = "admin")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
