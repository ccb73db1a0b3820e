//! Driving port for customer accounts.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Address, Customer, Error};

/// Request to register a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCustomerRequest {
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Postal address.
    pub address: Address,
}

/// Lookup key for a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerKey {
    /// Lookup by identifier.
    Id(Uuid),
    /// Lookup by unique email address.
    Email(String),
}

/// A customer together with their active cart, when one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    /// The customer account.
    pub customer: Customer,
    /// Identifier of the active cart, if any.
    pub cart_id: Option<Uuid>,
}

/// Driving port exposed to HTTP handlers for customer operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    /// Register a customer with a unique email address.
    async fn create_customer(&self, request: CreateCustomerRequest)
    -> Result<CustomerRecord, Error>;

    /// Fetch a customer by id or email.
    async fn find_customer(&self, key: CustomerKey) -> Result<CustomerRecord, Error>;
}
