//! HTTP inbound adapter exposing the storefront REST endpoints.

pub mod categories;
pub mod customers;
pub mod dto;
pub mod error;
pub mod health;
pub mod orders;
pub mod products;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Register every storefront route on an Actix service config.
///
/// Expects [`state::HttpState`] and [`health::HealthState`] to be present as
/// app data.
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(health::live)
        .service(health::ready)
        .service(categories::create_category)
        .service(categories::list_categories)
        .service(products::create_product)
        .service(products::list_products)
        .service(products::get_product)
        .service(products::update_product)
        .service(customers::create_customer)
        .service(customers::get_customer)
        .service(customers::list_customer_orders)
        .service(customers::get_or_create_cart)
        .service(customers::add_cart_item)
        .service(orders::get_order)
        .service(orders::update_order);
}
