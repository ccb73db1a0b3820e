//! Customer entity.

use thiserror::Error;
use uuid::Uuid;

/// Validation errors raised when constructing a [`Customer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomerValidationError {
    /// Name is empty after trimming whitespace.
    #[error("customer name must not be empty")]
    EmptyName,
    /// Email does not look like an address.
    #[error("customer email '{email}' is not a valid address")]
    InvalidEmail {
        /// The rejected value.
        email: String,
    },
}

/// Postal address attached to a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Street line.
    pub street: String,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Postal or ZIP code.
    pub postal_code: String,
    /// Country.
    pub country: String,
}

/// A customer account.
///
/// Email addresses are unique within the store. A customer owns at most one
/// active cart at a time; the cart is created implicitly on first item
/// addition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: Uuid,
    name: String,
    email: String,
    address: Address,
}

impl Customer {
    /// Create a customer with a freshly assigned identifier.
    ///
    /// # Errors
    /// Rejects blank names and emails without a local part and domain.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        address: Address,
    ) -> Result<Self, CustomerValidationError> {
        Self::from_parts(Uuid::new_v4(), name, email, address)
    }

    /// Rehydrate a customer from stored parts.
    ///
    /// # Errors
    /// Rejects blank names and emails without a local part and domain.
    pub fn from_parts(
        id: Uuid,
        name: impl Into<String>,
        email: impl Into<String>,
        address: Address,
    ) -> Result<Self, CustomerValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CustomerValidationError::EmptyName);
        }
        let email = email.into();
        if !email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty())
        {
            return Err(CustomerValidationError::InvalidEmail { email });
        }
        Ok(Self {
            id,
            name,
            email,
            address,
        })
    }

    /// Stable identifier, assigned at creation.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Unique email address.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Postal address.
    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }
}
