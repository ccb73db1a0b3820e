//! Product entity.

use thiserror::Error;
use uuid::Uuid;

use super::Category;

/// Validation errors raised when constructing a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductValidationError {
    /// Name is empty after trimming whitespace.
    #[error("product name must not be empty")]
    EmptyName,
}

/// A sellable product.
///
/// Prices are non-negative integers in minor currency units (cents). Stock is
/// informational only: this service performs no reservation or decrement on
/// checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: Uuid,
    name: String,
    description: String,
    price: u64,
    stock: u32,
    category: Category,
}

impl Product {
    /// Create a product with a freshly assigned identifier.
    ///
    /// # Errors
    /// Returns [`ProductValidationError::EmptyName`] for blank names.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: u64,
        stock: u32,
        category: Category,
    ) -> Result<Self, ProductValidationError> {
        Self::from_parts(Uuid::new_v4(), name, description, price, stock, category)
    }

    /// Rehydrate a product from stored parts.
    ///
    /// # Errors
    /// Returns [`ProductValidationError::EmptyName`] for blank names.
    pub fn from_parts(
        id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
        price: u64,
        stock: u32,
        category: Category,
    ) -> Result<Self, ProductValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        Ok(Self {
            id,
            name,
            description: description.into(),
            price,
            stock,
            category,
        })
    }

    /// Stable identifier, assigned at creation.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Display name, used for cart item lookup.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Unit price in minor currency units.
    #[must_use]
    pub fn price(&self) -> u64 {
        self.price
    }

    /// Units currently on hand. Informational; never reserved.
    #[must_use]
    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// The category this product belongs to.
    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Apply the non-`None` fields of `patch`, leaving the rest untouched.
    pub(crate) fn apply_patch(&mut self, patch: &super::ports::ProductPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
    }
}
