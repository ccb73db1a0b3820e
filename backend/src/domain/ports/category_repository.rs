//! Port for category persistence.

use async_trait::async_trait;

use crate::domain::Category;

use super::define_port_error;

define_port_error! {
    /// Errors raised by category repository adapters.
    pub enum CategoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "category repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "category repository query failed: {message}",
        /// The category name is already taken.
        DuplicateName { name: String } =>
            "a category named '{name}' already exists",
    }
}

/// Port for reading and writing product categories.
///
/// The category set is expected to stay small, so listing is unpaginated.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find a category by unique name.
    async fn find_by_name(&self, name: &str)
    -> Result<Option<Category>, CategoryRepositoryError>;

    /// Persist a new category.
    ///
    /// Fails with [`CategoryRepositoryError::DuplicateName`] when the name is
    /// already taken.
    async fn insert(&self, category: &Category) -> Result<(), CategoryRepositoryError>;

    /// List all categories, sorted by name.
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn duplicate_name_formats_name() {
        let err = CategoryRepositoryError::duplicate_name("books");
        assert_eq!(err.to_string(), "a category named 'books' already exists");
    }
}
