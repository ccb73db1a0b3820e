//! Customer HTTP handlers.
//!
//! ```text
//! POST /customers
//! GET  /customers/{id}
//! GET  /customers/{id}/orders
//! POST /customers/{id}/cart
//! POST /customers/{id}/cart/item
//! ```
//!
//! `GET /customers/{id}?key=email` treats the path segment as an email
//! address instead of an identifier.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::Error;
use crate::domain::ports::{
    AddCartItemRequest, CreateCustomerRequest, CustomerKey, ListCustomerOrdersRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{AddressBody, CustomerBody, OrderBody, OrderSummaryBody, PageBody};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_cursor, parse_id, parse_page_size, parse_quantity, require,
};

/// Request payload for registering a customer.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerBody {
    /// Display name.
    pub name: Option<String>,
    /// Unique email address.
    pub email: Option<String>,
    /// Postal address.
    pub address: Option<AddressBody>,
}

/// Query parameter selecting the customer lookup key.
#[derive(Debug, Deserialize, IntoParams)]
pub struct LookupQuery {
    /// `email` to treat the path segment as an email address.
    pub key: Option<String>,
}

/// Query parameters for listing a customer's orders.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersQuery {
    /// Maximum number of summaries per page; defaults to 10.
    pub page_size: Option<u32>,
    /// Continuation token from a previous page.
    pub after: Option<String>,
}

/// Request payload for setting a cart line.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemBody {
    /// Product name to look up.
    pub product: Option<String>,
    /// Quantity to set for the line.
    pub quantity: Option<i64>,
}

/// Register a customer with a unique email address.
#[utoipa::path(
    post,
    path = "/customers",
    request_body = CreateCustomerBody,
    responses(
        (status = 201, description = "Customer registered", body = CustomerBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "createCustomer"
)]
#[post("/customers")]
pub async fn create_customer(
    state: web::Data<HttpState>,
    payload: web::Json<CreateCustomerBody>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let request = CreateCustomerRequest {
        name: require(payload.name, FieldName::new("name"))?,
        email: require(payload.email, FieldName::new("email"))?,
        address: require(payload.address, FieldName::new("address"))?.into(),
    };

    let record = state.customers.create_customer(request).await?;
    Ok(HttpResponse::Created().json(CustomerBody::from(record)))
}

/// Fetch a customer by identifier, or by email with `?key=email`.
#[utoipa::path(
    get,
    path = "/customers/{id}",
    params(
        ("id" = String, Path, description = "Customer identifier, or email with key=email"),
        LookupQuery
    ),
    responses(
        (status = 200, description = "The customer", body = CustomerBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "No such customer", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "getCustomer"
)]
#[get("/customers/{id}")]
pub async fn get_customer(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<LookupQuery>,
) -> ApiResult<web::Json<CustomerBody>> {
    let raw = path.into_inner();
    let key = match query.into_inner().key.as_deref() {
        Some("email") => CustomerKey::Email(raw),
        Some(other) => {
            return Err(Error::invalid_request(format!(
                "Unsupported lookup key '{other}'."
            )));
        }
        None => CustomerKey::Id(parse_id(&raw, FieldName::new("id"))?),
    };

    let record = state.customers.find_customer(key).await?;
    Ok(web::Json(CustomerBody::from(record)))
}

/// List summaries of the customer's orders, newest first.
#[utoipa::path(
    get,
    path = "/customers/{id}/orders",
    params(
        ("id" = String, Path, description = "Customer identifier"),
        ListOrdersQuery
    ),
    responses(
        (status = 200, description = "One page of order summaries", body = PageBody<OrderSummaryBody>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "No such customer", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "listCustomerOrders"
)]
#[get("/customers/{id}/orders")]
pub async fn list_customer_orders(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<ListOrdersQuery>,
) -> ApiResult<web::Json<PageBody<OrderSummaryBody>>> {
    let customer_id = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let query = query.into_inner();
    let request = ListCustomerOrdersRequest {
        customer_id,
        page_size: parse_page_size(query.page_size, FieldName::new("pageSize"))?,
        cursor: parse_cursor(query.after, FieldName::new("after"))?,
    };

    let page = state.orders.list_customer_orders(request).await?;
    Ok(web::Json(PageBody::from_page(page, OrderSummaryBody::from)))
}

/// Return the customer's active cart, creating an empty one if absent.
#[utoipa::path(
    post,
    path = "/customers/{id}/cart",
    params(("id" = String, Path, description = "Customer identifier")),
    responses(
        (status = 200, description = "The active cart", body = OrderBody),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "No such customer", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "getOrCreateCart"
)]
#[post("/customers/{id}/cart")]
pub async fn get_or_create_cart(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<OrderBody>> {
    let customer_id = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let cart = state.orders.get_or_create_cart(&customer_id).await?;
    Ok(web::Json(OrderBody::from(&cart)))
}

/// Set a product's quantity in the customer's cart.
#[utoipa::path(
    post,
    path = "/customers/{id}/cart/item",
    params(("id" = String, Path, description = "Customer identifier")),
    request_body = CartItemBody,
    responses(
        (status = 200, description = "The updated cart", body = OrderBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "No such customer or product", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "addCartItem"
)]
#[post("/customers/{id}/cart/item")]
pub async fn add_cart_item(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CartItemBody>,
) -> ApiResult<web::Json<OrderBody>> {
    let customer_id = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let payload = payload.into_inner();
    let (Some(product_name), Some(raw_quantity)) = (payload.product, payload.quantity) else {
        return Err(Error::invalid_request("Missing product name or quantity."));
    };

    let cart = state
        .orders
        .add_cart_item(AddCartItemRequest {
            customer_id,
            product_name,
            quantity: parse_quantity(raw_quantity, FieldName::new("quantity"))?,
        })
        .await?;
    Ok(web::Json(OrderBody::from(&cart)))
}

#[cfg(test)]
#[path = "customers_tests.rs"]
mod tests;
