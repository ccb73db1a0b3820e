//! Product and category catalogue service.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use crate::domain::order_service::map_product_repository_error;
use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, CreateCategoryRequest, CreateProductRequest,
    ListProductsRequest, ProductCatalog, ProductPatch, ProductRepository, UpdateProductRequest,
};
use crate::domain::{Category, Error, Product};

fn map_category_repository_error(error: CategoryRepositoryError) -> Error {
    match error {
        CategoryRepositoryError::Connection { message } => Error::service_unavailable(message),
        CategoryRepositoryError::Query { message } => Error::internal(message),
        CategoryRepositoryError::DuplicateName { name } => {
            Error::conflict(format!("A category named '{name}' already exists."))
        }
    }
}

fn product_not_found(product_id: &Uuid) -> Error {
    Error::not_found(format!("No product with id '{product_id}' exists."))
}

/// Catalogue service over the product and category repositories.
#[derive(Clone)]
pub struct CatalogService<P, C> {
    product_repo: Arc<P>,
    category_repo: Arc<C>,
}

impl<P, C> CatalogService<P, C> {
    /// Create a new catalogue service over the given repositories.
    pub fn new(product_repo: Arc<P>, category_repo: Arc<C>) -> Self {
        Self {
            product_repo,
            category_repo,
        }
    }
}

impl<P, C> CatalogService<P, C>
where
    P: ProductRepository,
    C: CategoryRepository,
{
    /// Resolve a category reference by name. References to absent categories
    /// are a caller error, not a missing resource.
    async fn resolve_category(&self, name: &str) -> Result<Category, Error> {
        self.category_repo
            .find_by_name(name)
            .await
            .map_err(map_category_repository_error)?
            .ok_or_else(|| Error::invalid_request("Category does not exist."))
    }
}

#[async_trait]
impl<P, C> ProductCatalog for CatalogService<P, C>
where
    P: ProductRepository,
    C: CategoryRepository,
{
    async fn create_product(&self, request: CreateProductRequest) -> Result<Product, Error> {
        let category = self.resolve_category(&request.category).await?;
        let product = Product::new(
            request.name,
            request.description,
            request.price,
            request.stock,
            category,
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.product_repo
            .insert(&product)
            .await
            .map_err(map_product_repository_error)?;
        Ok(product)
    }

    async fn get_product(&self, product_id: &Uuid) -> Result<Product, Error> {
        self.product_repo
            .find_by_id(product_id)
            .await
            .map_err(map_product_repository_error)?
            .ok_or_else(|| product_not_found(product_id))
    }

    async fn update_product(
        &self,
        product_id: &Uuid,
        request: UpdateProductRequest,
    ) -> Result<Product, Error> {
        if request.is_empty() {
            return Err(Error::invalid_request("At least one field must be updated."));
        }
        if request
            .name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(Error::invalid_request("product name must not be empty"));
        }
        let category = match request.category {
            Some(name) => Some(self.resolve_category(&name).await?),
            None => None,
        };
        let patch = ProductPatch {
            name: request.name,
            description: request.description,
            price: request.price,
            stock: request.stock,
            category,
        };

        self.product_repo
            .update(product_id, &patch)
            .await
            .map_err(map_product_repository_error)?
            .ok_or_else(|| product_not_found(product_id))
    }

    async fn list_products(&self, request: ListProductsRequest) -> Result<Page<Product>, Error> {
        self.product_repo
            .list(request.category, request.page_size, request.cursor)
            .await
            .map_err(map_product_repository_error)
    }

    async fn create_category(&self, request: CreateCategoryRequest) -> Result<Category, Error> {
        let category = Category::new(request.name, request.description)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.category_repo
            .insert(&category)
            .await
            .map_err(map_category_repository_error)?;
        Ok(category)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        self.category_repo
            .list()
            .await
            .map_err(map_category_repository_error)
    }
}

#[cfg(test)]
#[path = "catalog_service_tests.rs"]
mod tests;
