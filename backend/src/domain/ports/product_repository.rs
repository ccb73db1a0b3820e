//! Port for product persistence.

use async_trait::async_trait;
use pagination::{Cursor, Page, PageSize};
use uuid::Uuid;

use crate::domain::{Category, Product};

use super::define_port_error;

define_port_error! {
    /// Errors raised by product repository adapters.
    pub enum ProductRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "product repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "product repository query failed: {message}",
    }
}

/// Field-wise partial update of a product. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement unit price in minor currency units.
    pub price: Option<u64>,
    /// Replacement stock level.
    pub stock: Option<u32>,
    /// Replacement category, already resolved to a stored category.
    pub category: Option<Category>,
}

impl ProductPatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.category.is_none()
    }
}

/// Port for reading and writing products.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find a product by id.
    async fn find_by_id(
        &self,
        product_id: &Uuid,
    ) -> Result<Option<Product>, ProductRepositoryError>;

    /// Find a product by exact name. Names are not unique; when several
    /// match, implementations return an arbitrary one.
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ProductRepositoryError>;

    /// Persist a new product.
    async fn insert(&self, product: &Product) -> Result<(), ProductRepositoryError>;

    /// Apply a patch to a stored product.
    ///
    /// Returns the updated product, or `None` when no product with
    /// `product_id` exists.
    async fn update(
        &self,
        product_id: &Uuid,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, ProductRepositoryError>;

    /// List products, optionally restricted to a category name.
    async fn list(
        &self,
        category: Option<String>,
        page_size: PageSize,
        cursor: Option<Cursor>,
    ) -> Result<Page<Product>, ProductRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn default_patch_is_empty() {
        assert!(ProductPatch::default().is_empty());
    }

    #[test]
    fn patch_with_any_field_is_not_empty() {
        let patch = ProductPatch {
            stock: Some(5),
            ..ProductPatch::default()
        };
        assert!(!patch.is_empty());
    }
}
