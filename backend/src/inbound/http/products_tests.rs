//! Tests for product HTTP handlers.
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use pagination::{Cursor, Page};
use serde_json::Value;

use super::*;
use crate::domain::{Category, Error, Product};
use crate::inbound::http::test_utils::{StateBuilder, test_state};

fn widget() -> Product {
    let category = Category::new("electronics", "gadgets").expect("valid category");
    Product::new("Widget", "a widget", 250, 10, category).expect("valid product")
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
            .service(create_product)
            .service(list_products)
            .service(get_product)
            .service(update_product),
    )
    .await
}

#[actix_web::test]
async fn create_product_requires_a_category() {
    let app = app_with(StateBuilder::default()).await;

    let request = actix_test::TestRequest::post()
        .uri("/products")
        .set_json(serde_json::json!({
            "name": "Widget",
            "price": 250,
            "stock": 10
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "missing required field: category");
}

#[actix_web::test]
async fn create_product_returns_the_stored_projection() {
    let mut builder = StateBuilder::default();
    builder
        .catalog
        .expect_create_product()
        .withf(|request| request.name == "Widget" && request.category == "electronics")
        .returning(|_| Ok(widget()));
    let app = app_with(builder).await;

    let request = actix_test::TestRequest::post()
        .uri("/products")
        .set_json(serde_json::json!({
            "name": "Widget",
            "description": "a widget",
            "price": 250,
            "stock": 10,
            "category": "electronics"
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["name"], "Widget");
    assert_eq!(body["price"], 250);
    assert_eq!(body["category"]["name"], "electronics");
}

#[actix_web::test]
async fn unknown_category_maps_to_bad_request() {
    let mut builder = StateBuilder::default();
    builder
        .catalog
        .expect_create_product()
        .returning(|_| Err(Error::invalid_request("Category does not exist.")));
    let app = app_with(builder).await;

    let request = actix_test::TestRequest::post()
        .uri("/products")
        .set_json(serde_json::json!({
            "name": "Widget",
            "price": 250,
            "stock": 10,
            "category": "nonexistent"
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Category does not exist.");
}

#[actix_web::test]
async fn listing_wraps_products_in_the_page_envelope() {
    let mut builder = StateBuilder::default();
    builder.catalog.expect_list_products().returning(|_| {
        Ok(Page::new(
            vec![widget()],
            Some(Cursor::from_token("token-2").expect("non-empty token")),
        ))
    });
    let app = app_with(builder).await;

    let request = actix_test::TestRequest::get()
        .uri("/products?category=electronics")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["data"][0]["name"], "Widget");
    assert_eq!(body["next"], "token-2");
}

#[actix_web::test]
async fn listing_rejects_a_zero_page_size() {
    let app = app_with(StateBuilder::default()).await;

    let request = actix_test::TestRequest::get()
        .uri("/products?pageSize=0")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn fetching_a_malformed_identifier_is_bad_request() {
    let app = app_with(StateBuilder::default()).await;

    let request = actix_test::TestRequest::get()
        .uri("/products/not-a-uuid")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Invalid id 'not-a-uuid' provided.");
}

#[actix_web::test]
async fn updating_with_no_fields_is_bad_request() {
    let product = widget();
    let mut builder = StateBuilder::default();
    builder
        .catalog
        .expect_update_product()
        .returning(|_, _| Err(Error::invalid_request("At least one field must be updated.")));
    let app = app_with(builder).await;

    let request = actix_test::TestRequest::patch()
        .uri(&format!("/products/{}", product.id()))
        .set_json(serde_json::json!({}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "At least one field must be updated.");
}

#[actix_web::test]
async fn updating_an_unknown_product_is_not_found() {
    let product = widget();
    let message = format!("No product with id '{}' exists.", product.id());
    let mut builder = StateBuilder::default();
    let stored = message.clone();
    builder
        .catalog
        .expect_update_product()
        .returning(move |_, _| Err(Error::not_found(stored.clone())));
    let app = app_with(builder).await;

    let request = actix_test::TestRequest::patch()
        .uri(&format!("/products/{}", product.id()))
        .set_json(serde_json::json!({ "price": 300 }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], message);
}
