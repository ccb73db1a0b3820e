//! Customer account service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::order_service::{customer_not_found, map_customer_repository_error};
use crate::domain::ports::{
    CreateCustomerRequest, CustomerDirectory, CustomerKey, CustomerRecord, CustomerRepository,
    OrderRepository, OrderRepositoryError,
};
use crate::domain::{Customer, Error};

fn map_order_repository_error(error: OrderRepositoryError) -> Error {
    match error {
        OrderRepositoryError::Connection { message } => Error::service_unavailable(message),
        OrderRepositoryError::Query { message } => Error::internal(message),
        // A cart read cannot violate lifecycle rules; treat it as a store
        // fault if it somehow does.
        rejected @ OrderRepositoryError::Rejected { .. } => Error::internal(rejected.to_string()),
    }
}

/// Customer directory service over the customer and order repositories.
///
/// The order repository is consulted only to report the customer's active
/// cart identifier alongside their record.
#[derive(Clone)]
pub struct CustomerService<C, O> {
    customer_repo: Arc<C>,
    order_repo: Arc<O>,
}

impl<C, O> CustomerService<C, O> {
    /// Create a new customer service over the given repositories.
    pub fn new(customer_repo: Arc<C>, order_repo: Arc<O>) -> Self {
        Self {
            customer_repo,
            order_repo,
        }
    }
}

impl<C, O> CustomerService<C, O>
where
    C: CustomerRepository,
    O: OrderRepository,
{
    async fn with_cart(&self, customer: Customer) -> Result<CustomerRecord, Error> {
        let cart_id = self
            .order_repo
            .find_cart_for_customer(&customer.id())
            .await
            .map_err(map_order_repository_error)?
            .map(|cart| cart.id());
        Ok(CustomerRecord { customer, cart_id })
    }
}

#[async_trait]
impl<C, O> CustomerDirectory for CustomerService<C, O>
where
    C: CustomerRepository,
    O: OrderRepository,
{
    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<CustomerRecord, Error> {
        let customer = Customer::new(request.name, request.email, request.address)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.customer_repo
            .insert(&customer)
            .await
            .map_err(map_customer_repository_error)?;

        Ok(CustomerRecord {
            customer,
            cart_id: None,
        })
    }

    async fn find_customer(&self, key: CustomerKey) -> Result<CustomerRecord, Error> {
        let customer = match key {
            CustomerKey::Id(customer_id) => self
                .customer_repo
                .find_by_id(&customer_id)
                .await
                .map_err(map_customer_repository_error)?
                .ok_or_else(|| customer_not_found(&customer_id))?,
            CustomerKey::Email(email) => self
                .customer_repo
                .find_by_email(&email)
                .await
                .map_err(map_customer_repository_error)?
                .ok_or_else(|| Error::not_found("Customer not found."))?,
        };
        self.with_cart(customer).await
    }
}

#[cfg(test)]
#[path = "customer_service_tests.rs"]
mod tests;
