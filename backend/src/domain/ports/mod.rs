//! Ports connecting the domain to its adapters.
//!
//! Driven ports ([`OrderRepository`], [`ProductRepository`],
//! [`CustomerRepository`], [`CategoryRepository`]) are implemented by
//! persistence adapters. Driving ports ([`OrderLifecycle`],
//! [`ProductCatalog`], [`CustomerDirectory`]) are implemented by the domain
//! services and consumed by HTTP handlers.

mod macros;

pub mod catalog;
pub mod category_repository;
pub mod customer_directory;
pub mod customer_repository;
pub mod order_lifecycle;
pub mod order_repository;
pub mod product_repository;

pub(crate) use self::macros::define_port_error;

pub use self::catalog::{
    CreateCategoryRequest, CreateProductRequest, ListProductsRequest, ProductCatalog,
    UpdateProductRequest,
};
pub use self::category_repository::{CategoryRepository, CategoryRepositoryError};
pub use self::customer_directory::{
    CreateCustomerRequest, CustomerDirectory, CustomerKey, CustomerRecord,
};
pub use self::customer_repository::{CustomerRepository, CustomerRepositoryError};
pub use self::order_lifecycle::{AddCartItemRequest, ListCustomerOrdersRequest, OrderLifecycle};
pub use self::order_repository::{OrderRepository, OrderRepositoryError};
pub use self::product_repository::{ProductPatch, ProductRepository, ProductRepositoryError};

#[cfg(test)]
pub use self::catalog::MockProductCatalog;
#[cfg(test)]
pub use self::category_repository::MockCategoryRepository;
#[cfg(test)]
pub use self::customer_directory::MockCustomerDirectory;
#[cfg(test)]
pub use self::customer_repository::MockCustomerRepository;
#[cfg(test)]
pub use self::order_lifecycle::MockOrderLifecycle;
#[cfg(test)]
pub use self::order_repository::MockOrderRepository;
#[cfg(test)]
pub use self::product_repository::MockProductRepository;
