//! Driving port for the product and category catalogue.

use async_trait::async_trait;
use pagination::{Cursor, Page, PageSize};
use uuid::Uuid;

use crate::domain::{Category, Error, Product};

/// Request to create a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProductRequest {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Unit price in minor currency units.
    pub price: u64,
    /// Units on hand.
    pub stock: u32,
    /// Name of an existing category.
    pub category: String,
}

/// Field-wise partial update of a product, with the category referenced by
/// name. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProductRequest {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement unit price in minor currency units.
    pub price: Option<u64>,
    /// Replacement stock level.
    pub stock: Option<u32>,
    /// Name of an existing category to move the product into.
    pub category: Option<String>,
}

impl UpdateProductRequest {
    /// Whether the request changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.category.is_none()
    }
}

/// Request to list products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListProductsRequest {
    /// Restrict results to this category name.
    pub category: Option<String>,
    /// Maximum number of products to return.
    pub page_size: PageSize,
    /// Resume token from a previous page, if any.
    pub cursor: Option<Cursor>,
}

/// Request to create a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCategoryRequest {
    /// Unique category name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

/// Driving port exposed to HTTP handlers for catalogue operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Create a product in an existing category.
    async fn create_product(&self, request: CreateProductRequest) -> Result<Product, Error>;

    /// Fetch a product by id.
    async fn get_product(&self, product_id: &Uuid) -> Result<Product, Error>;

    /// Apply a partial update to a product. At least one field must be set.
    async fn update_product(
        &self,
        product_id: &Uuid,
        request: UpdateProductRequest,
    ) -> Result<Product, Error>;

    /// List products, optionally restricted to a category.
    async fn list_products(&self, request: ListProductsRequest) -> Result<Page<Product>, Error>;

    /// Create a category with a unique name.
    async fn create_category(&self, request: CreateCategoryRequest) -> Result<Category, Error>;

    /// List all categories, sorted by name.
    async fn list_categories(&self) -> Result<Vec<Category>, Error>;
}
