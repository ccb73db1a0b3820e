//! Cart and order lifecycle service.
//!
//! Implements the [`OrderLifecycle`] driving port over the order, customer
//! and product repositories. Lifecycle rules are validated here for fast
//! failure and re-applied by the repository inside its transaction boundary,
//! so a stale read can never smuggle an invalid update past the rules.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use crate::domain::ports::{
    AddCartItemRequest, CustomerRepository, CustomerRepositoryError, ListCustomerOrdersRequest,
    OrderLifecycle, OrderRepository, OrderRepositoryError, ProductRepository,
    ProductRepositoryError,
};
use crate::domain::{Customer, Error, Order, OrderRuleViolation, OrderSummary, OrderUpdate};

pub(crate) fn violation_to_error(violation: OrderRuleViolation) -> Error {
    match violation {
        OrderRuleViolation::InvalidTransition { from, to } => Error::invalid_transition(format!(
            "Cannot transition order from '{from}' to '{to}'."
        ))
        .with_details(serde_json::json!({
            "from": from.as_str(),
            "to": to.as_str(),
        })),
        OrderRuleViolation::PaymentNotAllowed { .. } => Error::payment_not_allowed(
            "Cannot update payment information after an order has been placed.",
        ),
        OrderRuleViolation::MissingPayment => {
            Error::invalid_request("Payment is required when placing an order.")
        }
        OrderRuleViolation::TotalOverflow => {
            Error::invalid_request("Order total exceeds the representable amount.")
        }
    }
}

fn map_order_repository_error(error: OrderRepositoryError) -> Error {
    match error {
        OrderRepositoryError::Connection { message } => Error::service_unavailable(message),
        OrderRepositoryError::Query { message } => Error::internal(message),
        OrderRepositoryError::Rejected { violation } => violation_to_error(violation),
    }
}

pub(crate) fn map_customer_repository_error(error: CustomerRepositoryError) -> Error {
    match error {
        CustomerRepositoryError::Connection { message } => Error::service_unavailable(message),
        CustomerRepositoryError::Query { message } => Error::internal(message),
        CustomerRepositoryError::DuplicateEmail { email } => {
            Error::conflict(format!("A customer with email '{email}' already exists."))
        }
    }
}

pub(crate) fn map_product_repository_error(error: ProductRepositoryError) -> Error {
    match error {
        ProductRepositoryError::Connection { message } => Error::service_unavailable(message),
        ProductRepositoryError::Query { message } => Error::internal(message),
    }
}

pub(crate) fn order_not_found(order_id: &Uuid) -> Error {
    Error::not_found(format!("No order with id '{order_id}' exists."))
}

pub(crate) fn customer_not_found(customer_id: &Uuid) -> Error {
    Error::not_found(format!("No customer with id '{customer_id}' exists."))
}

/// Order lifecycle service over order, customer and product repositories.
#[derive(Clone)]
pub struct OrderLifecycleService<O, C, P> {
    order_repo: Arc<O>,
    customer_repo: Arc<C>,
    product_repo: Arc<P>,
}

impl<O, C, P> OrderLifecycleService<O, C, P> {
    /// Create a new lifecycle service over the given repositories.
    pub fn new(order_repo: Arc<O>, customer_repo: Arc<C>, product_repo: Arc<P>) -> Self {
        Self {
            order_repo,
            customer_repo,
            product_repo,
        }
    }
}

impl<O, C, P> OrderLifecycleService<O, C, P>
where
    O: OrderRepository,
    C: CustomerRepository,
    P: ProductRepository,
{
    async fn require_customer(&self, customer_id: &Uuid) -> Result<Customer, Error> {
        self.customer_repo
            .find_by_id(customer_id)
            .await
            .map_err(map_customer_repository_error)?
            .ok_or_else(|| customer_not_found(customer_id))
    }
}

#[async_trait]
impl<O, C, P> OrderLifecycle for OrderLifecycleService<O, C, P>
where
    O: OrderRepository,
    C: CustomerRepository,
    P: ProductRepository,
{
    async fn get_order(&self, order_id: &Uuid) -> Result<Order, Error> {
        self.order_repo
            .find_by_id(order_id)
            .await
            .map_err(map_order_repository_error)?
            .ok_or_else(|| order_not_found(order_id))
    }

    async fn update_order(&self, order_id: &Uuid, update: OrderUpdate) -> Result<Order, Error> {
        let current = self.get_order(order_id).await?;
        if update.is_empty() {
            return Ok(current);
        }
        current.validate_update(&update).map_err(violation_to_error)?;

        self.order_repo
            .apply_update(order_id, &update)
            .await
            .map_err(map_order_repository_error)?
            .ok_or_else(|| order_not_found(order_id))
    }

    async fn get_or_create_cart(&self, customer_id: &Uuid) -> Result<Order, Error> {
        let customer = self.require_customer(customer_id).await?;
        self.order_repo
            .get_or_create_cart(&customer)
            .await
            .map_err(map_order_repository_error)
    }

    async fn add_cart_item(&self, request: AddCartItemRequest) -> Result<Order, Error> {
        let customer = self.require_customer(&request.customer_id).await?;
        let product = self
            .product_repo
            .find_by_name(&request.product_name)
            .await
            .map_err(map_product_repository_error)?
            .ok_or_else(|| {
                Error::not_found(format!(
                    "No product with name '{}' exists.",
                    request.product_name
                ))
            })?;

        self.order_repo
            .put_cart_item(&customer, &product, request.quantity)
            .await
            .map_err(map_order_repository_error)
    }

    async fn list_customer_orders(
        &self,
        request: ListCustomerOrdersRequest,
    ) -> Result<Page<OrderSummary>, Error> {
        let customer = self.require_customer(&request.customer_id).await?;
        self.order_repo
            .list_for_customer(&customer.id(), request.page_size, request.cursor)
            .await
            .map_err(map_order_repository_error)
    }
}

#[cfg(test)]
#[path = "order_service_tests.rs"]
mod tests;
