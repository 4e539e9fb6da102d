//! Unified entry point for the PawMart document store.
//!
//! This crate re-exports the core types from `pawmart-core` and exposes the
//! available storage backends, so callers depend on a single crate.
//!
//! # Quick Start
//!
//! ```ignore
//! use pawmart_store::{prelude::*, memory::InMemoryStore};
//! use bson::doc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = DocumentStore::new(InMemoryStore::builder().build().await.unwrap());
//!     let orders = store.collection("order");
//!
//!     let ack = orders.insert_one(doc! { "listingId": "abc", "quantity": 2 }).await.unwrap();
//!     let all = orders.find(Query::all()).await.unwrap();
//!
//!     assert_eq!(all[0].get_object_id("_id").unwrap(), ack.inserted_id);
//!
//!     store.shutdown().await.unwrap();
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - In-memory storage for development and testing
//! - [`mongodb`] - Persistent MongoDB backend (requires `mongodb` feature)

pub mod prelude;

pub use pawmart_core::{backend, collection, document, error, outcome, query, store};

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend implementations.
pub mod memory {
    pub use pawmart_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use pawmart_mongodb::{MongoDbStore, MongoDbStoreBuilder};
}
