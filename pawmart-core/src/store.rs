//! Main document store handle.
//!
//! [`DocumentStore`] owns a backend behind an `Arc` and hands out borrowed
//! collection views. It is created once at startup and cloned into whatever
//! needs it; clones share the same backend and connection.
//!
//! # Example
//!
//! ```ignore
//! use pawmart_core::store::DocumentStore;
//!
//! let store = DocumentStore::new(backend);
//! let listings = store.typed_collection::<Listing>();
//! ```

use std::sync::Arc;

use crate::{
    backend::StoreBackend,
    collection::{Collection, TypedCollection},
    document::Document,
    error::DocumentStoreResult,
};

/// A shareable document store over a dynamically dispatched backend.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    backend: Arc<dyn StoreBackend>,
}

impl DocumentStore {
    /// Creates a new document store with the given backend.
    pub fn new<B: StoreBackend + 'static>(backend: B) -> Self {
        Self { backend: Arc::new(backend) }
    }

    /// Gets a typed collection for the specified document type.
    ///
    /// The collection name is determined by the document type's `collection_name()` method.
    pub fn typed_collection<D: Document>(&self) -> TypedCollection<'_, D> {
        TypedCollection::new(&*self.backend)
    }

    /// Gets an untyped collection with the given name.
    pub fn collection<'a>(&'a self, name: &'a str) -> Collection<'a> {
        Collection::new(name, &*self.backend)
    }

    /// Checks that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns the backend's error when the check fails.
    pub async fn ping(&self) -> DocumentStoreResult<()> {
        self.backend.ping().await
    }

    /// Shuts down the backend and releases its resources.
    ///
    /// Other clones of this store must not be used afterwards.
    pub async fn shutdown(&self) -> DocumentStoreResult<()> {
        self.backend.shutdown().await
    }
}
