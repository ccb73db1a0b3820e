//! Port for order and cart persistence.

use async_trait::async_trait;
use pagination::{Cursor, Page, PageSize};
use uuid::Uuid;

use crate::domain::{Customer, Order, OrderRuleViolation, OrderSummary, OrderUpdate, Product, Quantity};

use super::define_port_error;

define_port_error! {
    /// Errors raised by order repository adapters.
    pub enum OrderRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "order repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "order repository query failed: {message}",
        /// The store re-validated the mutation against current state and
        /// refused it.
        Rejected { violation: OrderRuleViolation } =>
            "order mutation rejected: {violation}",
    }
}

/// Port for reading and mutating orders.
///
/// The mutating operations are whole atomic units: implementations re-read
/// the current order and re-apply the domain rules inside their own
/// transaction boundary, so concurrent writers cannot interleave between a
/// caller's read and write. Rule failures surface as
/// [`OrderRepositoryError::Rejected`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Find an order by id.
    async fn find_by_id(&self, order_id: &Uuid) -> Result<Option<Order>, OrderRepositoryError>;

    /// Find the customer's active cart, if one exists.
    async fn find_cart_for_customer(
        &self,
        customer_id: &Uuid,
    ) -> Result<Option<Order>, OrderRepositoryError>;

    /// Return the customer's active cart, creating an empty one if absent.
    ///
    /// Idempotent: repeated calls yield the same cart until it is placed.
    async fn get_or_create_cart(&self, customer: &Customer)
    -> Result<Order, OrderRepositoryError>;

    /// Set the quantity of `product` in the customer's cart, creating the
    /// cart first when necessary. An existing line for the product is
    /// replaced, not accumulated.
    async fn put_cart_item(
        &self,
        customer: &Customer,
        product: &Product,
        quantity: Quantity,
    ) -> Result<Order, OrderRepositoryError>;

    /// Apply a status or payment update to an order.
    ///
    /// Returns `None` when no order with `order_id` exists. Lifecycle rule
    /// failures are reported as [`OrderRepositoryError::Rejected`] and leave
    /// the stored order untouched.
    async fn apply_update(
        &self,
        order_id: &Uuid,
        update: &OrderUpdate,
    ) -> Result<Option<Order>, OrderRepositoryError>;

    /// List summaries of a customer's orders, newest first.
    async fn list_for_customer(
        &self,
        customer_id: &Uuid,
        page_size: PageSize,
        cursor: Option<Cursor>,
    ) -> Result<Page<OrderSummary>, OrderRepositoryError>;
}
