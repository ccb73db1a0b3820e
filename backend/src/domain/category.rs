//! Product category entity.

use thiserror::Error;
use uuid::Uuid;

/// Validation errors raised when constructing a [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryValidationError {
    /// Name is empty after trimming whitespace.
    #[error("category name must not be empty")]
    EmptyName,
}

/// A product category, referenced by [`crate::domain::Product`].
///
/// Category names are unique within the store; renaming and deletion are out
/// of scope for this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: Uuid,
    name: String,
    description: String,
}

impl Category {
    /// Create a category with a freshly assigned identifier.
    ///
    /// # Errors
    /// Returns [`CategoryValidationError::EmptyName`] for blank names.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, CategoryValidationError> {
        Self::from_parts(Uuid::new_v4(), name, description)
    }

    /// Rehydrate a category from stored parts.
    ///
    /// # Errors
    /// Returns [`CategoryValidationError::EmptyName`] for blank names.
    pub fn from_parts(
        id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, CategoryValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        Ok(Self {
            id,
            name,
            description: description.into(),
        })
    }

    /// Stable identifier, assigned at creation.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Unique category name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn new_assigns_identifier() {
        let a = Category::new("books", "printed matter").expect("valid");
        let b = Category::new("books", "printed matter").expect("valid");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Category::new("   ", "d").expect_err("blank name");
        assert_eq!(err, CategoryValidationError::EmptyName);
    }
}
