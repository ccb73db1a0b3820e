//! Product HTTP handlers.
//!
//! ```text
//! GET   /products
//! POST  /products
//! GET   /products/{id}
//! PATCH /products/{id}
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CreateProductRequest, ListProductsRequest, UpdateProductRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{PageBody, ProductBody};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_cursor, parse_id, parse_page_size, require,
};

/// Request payload for creating a product.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductBody {
    /// Display name.
    pub name: Option<String>,
    /// Free-form description; empty when omitted.
    pub description: Option<String>,
    /// Unit price in minor currency units.
    pub price: Option<u64>,
    /// Units on hand.
    pub stock: Option<u32>,
    /// Name of an existing category.
    pub category: Option<String>,
}

/// Request payload for partially updating a product.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductBody {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement unit price in minor currency units.
    pub price: Option<u64>,
    /// Replacement stock level.
    pub stock: Option<u32>,
    /// Name of an existing category to move the product into.
    pub category: Option<String>,
}

/// Query parameters for listing products.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    /// Restrict results to this category name.
    pub category: Option<String>,
    /// Maximum number of products per page; defaults to 10.
    pub page_size: Option<u32>,
    /// Continuation token from a previous page.
    pub after: Option<String>,
}

/// Create a product in an existing category.
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductBody,
    responses(
        (status = 201, description = "Product created", body = ProductBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    payload: web::Json<CreateProductBody>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let request = CreateProductRequest {
        name: require(payload.name, FieldName::new("name"))?,
        description: payload.description.unwrap_or_default(),
        price: require(payload.price, FieldName::new("price"))?,
        stock: require(payload.stock, FieldName::new("stock"))?,
        category: require(payload.category, FieldName::new("category"))?,
    };

    let product = state.catalog.create_product(request).await?;
    Ok(HttpResponse::Created().json(ProductBody::from(&product)))
}

/// List products, optionally restricted to a category.
#[utoipa::path(
    get,
    path = "/products",
    params(ListProductsQuery),
    responses(
        (status = 200, description = "One page of products", body = PageBody<ProductBody>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    query: web::Query<ListProductsQuery>,
) -> ApiResult<web::Json<PageBody<ProductBody>>> {
    let query = query.into_inner();
    let request = ListProductsRequest {
        category: query.category,
        page_size: parse_page_size(query.page_size, FieldName::new("pageSize"))?,
        cursor: parse_cursor(query.after, FieldName::new("after"))?,
    };

    let page = state.catalog.list_products(request).await?;
    Ok(web::Json(PageBody::from_page(page, |product| {
        ProductBody::from(&product)
    })))
}

/// Fetch a product by id.
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "The product", body = ProductBody),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "No such product", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "getProduct"
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProductBody>> {
    let product_id = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let product = state.catalog.get_product(&product_id).await?;
    Ok(web::Json(ProductBody::from(&product)))
}

/// Partially update a product. At least one field must be supplied.
#[utoipa::path(
    patch,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product identifier")),
    request_body = UpdateProductBody,
    responses(
        (status = 200, description = "The updated product", body = ProductBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "No such product", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "updateProduct"
)]
#[patch("/products/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateProductBody>,
) -> ApiResult<web::Json<ProductBody>> {
    let product_id = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let payload = payload.into_inner();
    let request = UpdateProductRequest {
        name: payload.name,
        description: payload.description,
        price: payload.price,
        stock: payload.stock,
        category: payload.category,
    };

    let product = state.catalog.update_product(&product_id, request).await?;
    Ok(web::Json(ProductBody::from(&product)))
}

#[cfg(test)]
#[path = "products_tests.rs"]
mod tests;
