//! Collection handles for document store operations.
//!
//! - [`Collection`] - Untyped collection working on raw BSON documents
//! - [`TypedCollection`] - Collection for a specific [`Document`] type
//!
//! Both are cheap borrowed views onto the store's backend; create them per
//! request.
//!
//! # Example
//!
//! ```ignore
//! let listings = store.typed_collection::<Listing>();
//! let ack = listings.insert_one(listing).await?;
//! let stored = listings.find_one(Filter::id(ack.inserted_id)).await?;
//! ```

use bson::Document as BsonDocument;
use std::marker::PhantomData;

use crate::{
    backend::StoreBackend,
    document::{Document, ID_FIELD},
    error::DocumentStoreResult,
    outcome::{DeleteResult, InsertOneResult, UpdateResult},
    query::{Expr, Query},
};

/// An untyped collection with a reference to a storage backend.
///
/// All documents are represented as BSON documents. Identity hygiene is
/// enforced here: any `_id` on an inserted document or an update field set
/// is discarded before the backend sees it.
#[derive(Debug, Clone, Copy)]
pub struct Collection<'a> {
    name: &'a str,
    backend: &'a dyn StoreBackend,
}

impl<'a> Collection<'a> {
    pub(crate) fn new(name: &'a str, backend: &'a dyn StoreBackend) -> Self {
        Self { name, backend }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Inserts a document; the backend assigns its identity.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`](crate::error::DocumentStoreError) if the operation fails.
    pub async fn insert_one(&self, mut document: BsonDocument) -> DocumentStoreResult<InsertOneResult> {
        document.remove(ID_FIELD);

        self.backend
            .insert_one(document, self.name)
            .await
    }

    /// Queries documents in the collection.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`](crate::error::DocumentStoreError) if the operation fails.
    pub async fn find(&self, query: Query) -> DocumentStoreResult<Vec<BsonDocument>> {
        self.backend
            .find(query, self.name)
            .await
    }

    /// Returns the first document matching the filter.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`](crate::error::DocumentStoreError) if the operation fails.
    pub async fn find_one(&self, filter: Expr) -> DocumentStoreResult<Option<BsonDocument>> {
        self.backend
            .find_one(filter, self.name)
            .await
    }

    /// Merges `fields` into the first document matching the filter.
    ///
    /// An `_id` entry in `fields` is dropped; identities never change after insert.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`](crate::error::DocumentStoreError) if the operation fails.
    pub async fn update_one(
        &self,
        filter: Expr,
        mut fields: BsonDocument,
    ) -> DocumentStoreResult<UpdateResult> {
        fields.remove(ID_FIELD);

        self.backend
            .update_one(filter, fields, self.name)
            .await
    }

    /// Deletes the first document matching the filter.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`](crate::error::DocumentStoreError) if the operation fails.
    pub async fn delete_one(&self, filter: Expr) -> DocumentStoreResult<DeleteResult> {
        self.backend
            .delete_one(filter, self.name)
            .await
    }
}

/// A collection bound to a document type.
#[derive(Debug)]
pub struct TypedCollection<'a, D: Document> {
    inner: Collection<'a>,
    _marker: PhantomData<D>,
}

impl<'a, D: Document> TypedCollection<'a, D> {
    pub(crate) fn new(backend: &'a dyn StoreBackend) -> Self {
        Self {
            inner: Collection::new(D::collection_name(), backend),
            _marker: PhantomData,
        }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Inserts a document; any identity it carries is replaced by a fresh one.
    pub async fn insert_one(&self, document: D) -> DocumentStoreResult<InsertOneResult> {
        self.inner
            .insert_one(document.into_document())
            .await
    }

    /// Queries documents in the collection.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`](crate::error::DocumentStoreError) if the query
    /// fails or a stored document cannot be converted into `D`.
    pub async fn find(&self, query: Query) -> DocumentStoreResult<Vec<D>> {
        self.inner
            .find(query)
            .await?
            .into_iter()
            .map(D::from_document)
            .collect()
    }

    pub async fn find_one(&self, filter: Expr) -> DocumentStoreResult<Option<D>> {
        self.inner
            .find_one(filter)
            .await?
            .map(D::from_document)
            .transpose()
    }

    /// Merges the fields of `patch` into the first document matching the filter.
    ///
    /// The identity of `patch` is ignored.
    pub async fn update_one(&self, filter: Expr, patch: D) -> DocumentStoreResult<UpdateResult> {
        self.inner
            .update_one(filter, patch.into_document())
            .await
    }

    pub async fn delete_one(&self, filter: Expr) -> DocumentStoreResult<DeleteResult> {
        self.inner
            .delete_one(filter)
            .await
    }
}
