//! MongoDB backend implementation for the PawMart document store.
//!
//! This crate provides a MongoDB-based implementation of the `StoreBackend` trait
//! used in production against a MongoDB Atlas cluster.
//!
//! # Features
//!
//! - **Persistent storage** - Data lives in MongoDB Atlas or a self-hosted MongoDB
//! - **Server-side filtering** - Filters are translated to MongoDB query documents
//! - **Key escaping** - Caller-chosen field names containing `.`, `$`, `%` or NUL round-trip unchanged
//! - **Lazy connection** - The driver connects on first use; [`ping`](pawmart_core::backend::StoreBackend::ping) checks reachability
//!
//! # Example
//!
//! ```ignore
//! use pawmart_core::{backend::StoreBackendBuilder, store::DocumentStore};
//! use pawmart_mongodb::MongoDbStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = MongoDbStore::builder("mongodb://localhost:27017", "pawMart")
//!         .build()
//!         .await?;
//!     let store = DocumentStore::new(backend);
//!
//!     store.ping().await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as pawmart_mongodb;

pub mod store;
mod query;
mod sanitizer;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
