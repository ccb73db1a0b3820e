//! Category HTTP handlers.
//!
//! ```text
//! GET  /categories
//! POST /categories
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::ports::CreateCategoryRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::CategoryBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

/// Request payload for creating a category.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryBody {
    /// Unique category name.
    pub name: Option<String>,
    /// Free-form description; empty when omitted.
    pub description: Option<String>,
}

/// Create a category with a unique name.
#[utoipa::path(
    post,
    path = "/categories",
    request_body = CreateCategoryBody,
    responses(
        (status = 201, description = "Category created", body = CategoryBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Name already taken", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "createCategory"
)]
#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    payload: web::Json<CreateCategoryBody>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let name = require(payload.name, FieldName::new("name"))?;

    let category = state
        .catalog
        .create_category(CreateCategoryRequest {
            name,
            description: payload.description.unwrap_or_default(),
        })
        .await?;

    Ok(HttpResponse::Created().json(CategoryBody::from(&category)))
}

/// List all categories, sorted by name.
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "All categories", body = [CategoryBody]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CategoryBody>>> {
    let categories = state.catalog.list_categories().await?;
    Ok(web::Json(
        categories.iter().map(CategoryBody::from).collect(),
    ))
}
