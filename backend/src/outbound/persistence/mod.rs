//! Persistence adapters for the repository ports.
//!
//! [`memory::InMemoryStore`] backs local development and tests;
//! [`document::DocumentStore`] talks to the hosted document database over
//! HTTP.

pub mod document;
pub mod memory;

pub use document::{DocumentStore, DocumentStoreConfig};
pub use memory::InMemoryStore;
