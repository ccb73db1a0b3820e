//! Driving port for the cart and order lifecycle.

use async_trait::async_trait;
use pagination::{Cursor, Page, PageSize};
use uuid::Uuid;

use crate::domain::{Error, Order, OrderSummary, OrderUpdate, Quantity};

/// Request to set a product's quantity in a customer's cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCartItemRequest {
    /// Owning customer.
    pub customer_id: Uuid,
    /// Product looked up by exact name.
    pub product_name: String,
    /// Quantity to set for the line.
    pub quantity: Quantity,
}

/// Request to list a customer's orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCustomerOrdersRequest {
    /// Owning customer.
    pub customer_id: Uuid,
    /// Maximum number of summaries to return.
    pub page_size: PageSize,
    /// Resume token from a previous page, if any.
    pub cursor: Option<Cursor>,
}

/// Driving port exposed to HTTP handlers for cart and order operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderLifecycle: Send + Sync {
    /// Fetch an order by id.
    async fn get_order(&self, order_id: &Uuid) -> Result<Order, Error>;

    /// Apply a status or payment update to an order.
    ///
    /// An empty update succeeds and returns the order unchanged.
    async fn update_order(&self, order_id: &Uuid, update: OrderUpdate) -> Result<Order, Error>;

    /// Return the customer's active cart, creating one if absent.
    async fn get_or_create_cart(&self, customer_id: &Uuid) -> Result<Order, Error>;

    /// Set a product's quantity in the customer's cart, creating the cart
    /// first when necessary.
    async fn add_cart_item(&self, request: AddCartItemRequest) -> Result<Order, Error>;

    /// List summaries of the customer's orders, newest first.
    async fn list_customer_orders(
        &self,
        request: ListCustomerOrdersRequest,
    ) -> Result<Page<OrderSummary>, Error>;
}
