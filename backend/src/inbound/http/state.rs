//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CustomerDirectory, OrderLifecycle, ProductCatalog};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Cart and order lifecycle operations.
    pub orders: Arc<dyn OrderLifecycle>,
    /// Product and category catalogue operations.
    pub catalog: Arc<dyn ProductCatalog>,
    /// Customer account operations.
    pub customers: Arc<dyn CustomerDirectory>,
}

impl HttpState {
    /// Construct state from the three driving ports.
    pub fn new(
        orders: Arc<dyn OrderLifecycle>,
        catalog: Arc<dyn ProductCatalog>,
        customers: Arc<dyn CustomerDirectory>,
    ) -> Self {
        Self {
            orders,
            catalog,
            customers,
        }
    }
}
