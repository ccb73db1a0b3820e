//! Shopfront library modules.
//!
//! The crate follows a hexagonal layout: `domain` holds entities, ports and
//! services; `inbound` adapts HTTP requests onto driving ports; `outbound`
//! implements driven ports against concrete stores.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::trace::Trace;
