//! Hosted document database adapter.
//!
//! [`client`] invokes the store's named transactional functions over HTTP;
//! [`dto`] holds the wire payloads they exchange.

mod client;
mod dto;

pub use client::{DocumentStore, DocumentStoreConfig};
