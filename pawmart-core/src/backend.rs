//! Storage backend abstraction for the document store.
//!
//! This module defines the traits that abstract over different storage
//! implementations, allowing the document store to work with an in-memory
//! backend in tests and a database backend in production.
//!
//! # Overview
//!
//! The [`StoreBackend`] trait provides a unified async interface for the
//! single-document operations the API layer needs: insert, find, find-one,
//! update-one, delete-one, plus a connectivity check. Implementations are
//! required to be thread-safe (`Send + Sync`) and support concurrent access.
//!
//! # Traits
//!
//! - [`StoreBackend`]: The core trait for storage backends
//! - [`StoreBackendBuilder`]: Factory trait for creating backend instances
//!
//! # Examples
//!
//! ```ignore
//! use pawmart_core::backend::StoreBackend;
//! use bson::doc;
//!
//! let backend = MyBackendImpl::new();
//!
//! let ack = backend.insert_one(doc! { "name": "Leash" }, "listing").await?;
//! let stored = backend.find_one(Filter::id(ack.inserted_id), "listing").await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use bson::Document as BsonDocument;
use std::fmt::Debug;

use crate::{
    error::DocumentStoreResult,
    outcome::{DeleteResult, InsertOneResult, UpdateResult},
    query::{Expr, Query},
};

/// Abstract interface for document storage backends.
///
/// # Thread Safety
///
/// All implementations must be thread-safe and support concurrent access from
/// multiple async tasks. Each operation is atomic at the single-document
/// level; nothing is guaranteed across documents or across calls.
///
/// # Identities
///
/// Backends own identity assignment. Documents handed to
/// [`insert_one`](StoreBackend::insert_one) and field sets handed to
/// [`update_one`](StoreBackend::update_one) never carry an `_id`; the
/// [`Collection`](crate::collection::Collection) handle strips it before
/// calling in.
///
/// # Error Handling
///
/// A filter that matches nothing is not an error. `find_one` returns `None`,
/// `update_one` and `delete_one` return zero counts.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Inserts a document, assigning it a fresh `ObjectId` identity.
    ///
    /// The collection is created on first insert.
    async fn insert_one(
        &self,
        document: BsonDocument,
        collection: &str,
    ) -> DocumentStoreResult<InsertOneResult>;

    /// Returns the documents matching the query, in the backend's natural order.
    ///
    /// A missing collection yields an empty result.
    async fn find(&self, query: Query, collection: &str) -> DocumentStoreResult<Vec<BsonDocument>>;

    /// Returns the first document matching the filter, if any.
    async fn find_one(
        &self,
        filter: Expr,
        collection: &str,
    ) -> DocumentStoreResult<Option<BsonDocument>>;

    /// Sets the given top-level fields on the first document matching the filter.
    ///
    /// Fields absent from `fields` are left untouched (merge, not replace).
    async fn update_one(
        &self,
        filter: Expr,
        fields: BsonDocument,
        collection: &str,
    ) -> DocumentStoreResult<UpdateResult>;

    /// Removes the first document matching the filter.
    async fn delete_one(&self, filter: Expr, collection: &str) -> DocumentStoreResult<DeleteResult>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> DocumentStoreResult<()>;

    /// Releases backend resources.
    ///
    /// The default implementation is a no-op; backends holding external
    /// connections override it.
    async fn shutdown(&self) -> DocumentStoreResult<()> {
        Ok(())
    }
}

#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend>;
}
