//! Tests for order HTTP handlers.
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use serde_json::Value;
use uuid::Uuid;

use super::*;
use crate::domain::{Address, Customer, Order, OrderStatus};
use crate::inbound::http::test_utils::{StateBuilder, test_state};

fn ada() -> Customer {
    Customer::new(
        "Ada",
        "ada@example.com",
        Address {
            street: "1 High St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            postal_code: "62701".into(),
            country: "US".into(),
        },
    )
    .expect("valid customer")
}

fn placed_order() -> Order {
    Order::new_cart(ada())
        .apply_update(&OrderUpdate {
            new_status: Some(OrderStatus::Processing),
            payment: Some(Payment::new("card", Some("tok_123".into())).expect("valid payment")),
        })
        .expect("placed")
}

async fn app_with(
    builder: StateBuilder,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(test_state(builder)))
            .service(get_order)
            .service(update_order),
    )
    .await
}

#[actix_web::test]
async fn fetching_a_malformed_identifier_is_bad_request() {
    let app = app_with(StateBuilder::default()).await;

    let request = actix_test::TestRequest::get()
        .uri("/orders/not-a-uuid")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Invalid id 'not-a-uuid' provided.");
}

#[actix_web::test]
async fn fetching_an_unknown_order_is_not_found() {
    let order_id = Uuid::new_v4();
    let message = format!("No order with id '{order_id}' exists.");
    let stored = message.clone();
    let mut builder = StateBuilder::default();
    builder
        .orders
        .expect_get_order()
        .returning(move |_| Err(Error::not_found(stored.clone())));
    let app = app_with(builder).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/orders/{order_id}"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], message);
}

#[actix_web::test]
async fn fetching_an_order_returns_its_body() {
    let order = placed_order();
    let order_json_id = order.id().to_string();
    let mut builder = StateBuilder::default();
    builder
        .orders
        .expect_get_order()
        .returning(move |_| Ok(order.clone()));
    let app = app_with(builder).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/orders/{order_json_id}"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["id"], order_json_id);
    assert_eq!(body["status"], "processing");
    assert_eq!(body["payment"]["method"], "card");
    assert_eq!(body["customer"]["email"], "ada@example.com");
    assert_eq!(body["customer"]["address"]["city"], "Springfield");
}

#[actix_web::test]
async fn updating_with_an_unknown_status_is_bad_request() {
    let app = app_with(StateBuilder::default()).await;

    let request = actix_test::TestRequest::patch()
        .uri(&format!("/orders/{}", Uuid::new_v4()))
        .set_json(serde_json::json!({ "status": "returned" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body["details"]["code"].as_str(),
        Some("invalid_status")
    );
}

#[actix_web::test]
async fn updating_with_a_blank_payment_method_is_bad_request() {
    let app = app_with(StateBuilder::default()).await;

    let request = actix_test::TestRequest::patch()
        .uri(&format!("/orders/{}", Uuid::new_v4()))
        .set_json(serde_json::json!({
            "status": "processing",
            "payment": { "method": "  " }
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn invalid_transitions_surface_as_bad_request_with_details() {
    let mut builder = StateBuilder::default();
    builder.orders.expect_update_order().returning(|_, _| {
        Err(
            Error::invalid_transition("Cannot transition order from 'cart' to 'delivered'.")
                .with_details(serde_json::json!({ "from": "cart", "to": "delivered" })),
        )
    });
    let app = app_with(builder).await;

    let request = actix_test::TestRequest::patch()
        .uri(&format!("/orders/{}", Uuid::new_v4()))
        .set_json(serde_json::json!({ "status": "delivered" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_transition");
    assert_eq!(body["details"]["to"], "delivered");
}

#[actix_web::test]
async fn placing_a_cart_passes_status_and_payment_together() {
    let placed = placed_order();
    let mut builder = StateBuilder::default();
    let stored = placed.clone();
    builder
        .orders
        .expect_update_order()
        .withf(|_, update| {
            update.new_status == Some(OrderStatus::Processing)
                && update
                    .payment
                    .as_ref()
                    .is_some_and(|payment| payment.method() == "card")
        })
        .returning(move |_, _| Ok(stored.clone()));
    let app = app_with(builder).await;

    let request = actix_test::TestRequest::patch()
        .uri(&format!("/orders/{}", placed.id()))
        .set_json(serde_json::json!({
            "status": "processing",
            "payment": { "method": "card", "reference": "tok_123" }
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "processing");
    assert_eq!(body["payment"]["reference"], "tok_123");
}

#[actix_web::test]
async fn an_empty_body_is_a_no_op() {
    let order = Order::new_cart(ada());
    let mut builder = StateBuilder::default();
    let stored = order.clone();
    builder
        .orders
        .expect_update_order()
        .withf(|_, update| update.is_empty())
        .returning(move |_, _| Ok(stored.clone()));
    let app = app_with(builder).await;

    let request = actix_test::TestRequest::patch()
        .uri(&format!("/orders/{}", order.id()))
        .set_json(serde_json::json!({}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "cart");
}
