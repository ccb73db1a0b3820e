//! Shared fixtures for HTTP handler tests.

use std::sync::Arc;

use crate::domain::ports::{MockCustomerDirectory, MockOrderLifecycle, MockProductCatalog};
use crate::inbound::http::state::HttpState;

/// Mutable bundle of mocked driving ports for a single test.
#[derive(Default)]
pub struct StateBuilder {
    pub orders: MockOrderLifecycle,
    pub catalog: MockProductCatalog,
    pub customers: MockCustomerDirectory,
}

/// Freeze the builder into handler state.
pub fn test_state(builder: StateBuilder) -> HttpState {
    HttpState::new(
        Arc::new(builder.orders),
        Arc::new(builder.catalog),
        Arc::new(builder.customers),
    )
}
