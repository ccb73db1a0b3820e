//! Domain entities, ports and services.
//!
//! Everything in this module is transport and persistence agnostic. The order
//! lifecycle rules in [`order`] are the invariant-bearing core; adapters
//! re-apply those pure functions inside their own transaction boundaries.

pub mod catalog_service;
pub mod category;
pub mod customer;
pub mod customer_service;
pub mod error;
pub mod order;
pub mod order_service;
pub mod ports;
pub mod product;
pub mod trace_id;

pub use self::category::{Category, CategoryValidationError};
pub use self::customer::{Address, Customer, CustomerValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::order::{
    LineItem, Order, OrderRuleViolation, OrderStatus, OrderSummary, OrderUpdate,
    ParseOrderStatusError, Payment, PaymentValidationError, Quantity, QuantityError,
};
pub use self::product::{Product, ProductValidationError};
pub use self::trace_id::TraceId;

/// Response header carrying the request correlation identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
