//! Order HTTP handlers.
//!
//! ```text
//! GET   /orders/{id}
//! PATCH /orders/{id}
//! ```

use actix_web::{get, patch, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Error, OrderUpdate, Payment};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{OrderBody, PaymentBody};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, parse_status};

/// Request payload for updating an order.
///
/// Both parts are optional; an empty body is a no-op that returns the order
/// unchanged.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderBody {
    /// Target status: `cart`, `processing`, `shipped` or `delivered`.
    pub status: Option<String>,
    /// Payment descriptor; only accepted while placing a cart.
    pub payment: Option<PaymentBody>,
}

fn parse_update(body: UpdateOrderBody) -> Result<OrderUpdate, Error> {
    let new_status = body
        .status
        .as_deref()
        .map(|raw| parse_status(raw, FieldName::new("status")))
        .transpose()?;
    let payment = body
        .payment
        .map(|payment| {
            Payment::new(payment.method, payment.reference)
                .map_err(|err| Error::invalid_request(err.to_string()))
        })
        .transpose()?;
    Ok(OrderUpdate {
        new_status,
        payment,
    })
}

/// Fetch an order by id.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = String, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "The order", body = OrderBody),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "No such order", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "getOrder"
)]
#[get("/orders/{id}")]
pub async fn get_order(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<OrderBody>> {
    let order_id = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let order = state.orders.get_order(&order_id).await?;
    Ok(web::Json(OrderBody::from(&order)))
}

/// Advance an order's status and attach payment when placing a cart.
#[utoipa::path(
    patch,
    path = "/orders/{id}",
    params(("id" = String, Path, description = "Order identifier")),
    request_body = UpdateOrderBody,
    responses(
        (status = 200, description = "The updated order", body = OrderBody),
        (status = 400, description = "Invalid request or lifecycle violation", body = ErrorSchema),
        (status = 404, description = "No such order", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "updateOrder"
)]
#[patch("/orders/{id}")]
pub async fn update_order(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateOrderBody>,
) -> ApiResult<web::Json<OrderBody>> {
    let order_id = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let update = parse_update(payload.into_inner())?;
    let order = state.orders.update_order(&order_id, update).await?;
    Ok(web::Json(OrderBody::from(&order)))
}

#[cfg(test)]
#[path = "orders_tests.rs"]
mod tests;
