//! Storefront: an e-commerce backend core built as message-passing
//! collection actors.
//!
//! The catalog side turns raw request parameters into a typed, bounded
//! product query (keyword search, allow-listed field filters, pagination)
//! and keeps each product's derived rating fields consistent as reviews
//! come and go. The order side walks fulfillment status forward only and
//! coordinates the one cross-aggregate concern in the system: stock is
//! reserved on the products when an order is created (all lines or none)
//! and given back when a delivered order is deleted.
//!
//! Routing, credential handling, and serialization live outside this
//! crate; it consumes a [`domain::Identity`] per request and exposes
//! typed results and [`error::Fault`]-classified errors.

pub mod app_system;
pub mod catalog;
pub mod clients;
pub mod collection;
pub mod domain;
pub mod error;
pub mod orders;

#[cfg(test)]
pub mod mock_framework;
