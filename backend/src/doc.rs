//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (categories,
//!   products, customers, orders, health)
//! - **Schemas**: Request and response bodies from the inbound layer plus the
//!   error wrappers ([`ErrorSchema`], [`ErrorCodeSchema`]) that document the
//!   domain error shape without coupling domain types to utoipa
//!
//! The generated specification is served at `/api-docs/openapi.json` for
//! external tooling.

use utoipa::OpenApi;

use crate::inbound::http::dto::{
    AddressBody, CategoryBody, CustomerBody, OrderBody, OrderCustomerBody, OrderItemBody,
    OrderSummaryBody, PaymentBody, ProductBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shopfront API",
        description = "HTTP storefront over a hosted document database: \
                       catalogue, customers, carts and order lifecycle."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::customers::create_customer,
        crate::inbound::http::customers::get_customer,
        crate::inbound::http::customers::list_customer_orders,
        crate::inbound::http::customers::get_or_create_cart,
        crate::inbound::http::customers::add_cart_item,
        crate::inbound::http::orders::get_order,
        crate::inbound::http::orders::update_order,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CategoryBody,
        ProductBody,
        AddressBody,
        PaymentBody,
        OrderItemBody,
        OrderCustomerBody,
        OrderBody,
        OrderSummaryBody,
        CustomerBody,
        ErrorSchema,
        ErrorCodeSchema,
    )),
    tags(
        (name = "categories", description = "Product categories"),
        (name = "products", description = "Catalogue products"),
        (name = "customers", description = "Customer accounts and carts"),
        (name = "orders", description = "Order retrieval and lifecycle updates"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
