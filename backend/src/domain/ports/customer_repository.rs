//! Port for customer persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Customer;

use super::define_port_error;

define_port_error! {
    /// Errors raised by customer repository adapters.
    pub enum CustomerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "customer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "customer repository query failed: {message}",
        /// The email address is already registered.
        DuplicateEmail { email: String } =>
            "a customer with email '{email}' already exists",
    }
}

/// Port for reading and writing customer accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Find a customer by id.
    async fn find_by_id(
        &self,
        customer_id: &Uuid,
    ) -> Result<Option<Customer>, CustomerRepositoryError>;

    /// Find a customer by unique email address.
    async fn find_by_email(&self, email: &str)
    -> Result<Option<Customer>, CustomerRepositoryError>;

    /// Persist a new customer.
    ///
    /// Fails with [`CustomerRepositoryError::DuplicateEmail`] when the email
    /// address is already taken.
    async fn insert(&self, customer: &Customer) -> Result<(), CustomerRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn duplicate_email_formats_address() {
        let err = CustomerRepositoryError::duplicate_email("ada@example.com");
        assert_eq!(
            err.to_string(),
            "a customer with email 'ada@example.com' already exists"
        );
    }
}
