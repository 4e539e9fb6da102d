//! In-memory document storage backend.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! It uses async-aware read-write locks for concurrent access and backs the API's
//! test suite and local development runs (`STORE_BACKEND=memory`).
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using async-aware RwLock
//! - **Natural order** - Unsorted queries return documents in insertion order
//! - **Filter support** - Field equality filters, including `ObjectId` identities
//!
//! # Quick Start
//!
//! ```ignore
//! use pawmart_core::{store::DocumentStore, query::Filter};
//! use pawmart_memory::InMemoryStore;
//! use bson::doc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = DocumentStore::new(InMemoryStore::new());
//!     let listings = store.collection("listing");
//!
//!     let ack = listings.insert_one(doc! { "name": "Leash" }).await.unwrap();
//!     let stored = listings.find_one(Filter::id(ack.inserted_id)).await.unwrap();
//!     assert!(stored.is_some());
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as pawmart_memory;

pub mod store;
pub mod evaluator;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
