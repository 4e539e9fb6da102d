//! In-memory storage implementation for document stores.
//!
//! Documents are kept as BSON documents in per-collection vectors guarded by
//! an async-aware read-write lock. Vectors keep insertion order, which serves
//! as the natural order for unsorted queries.

use std::{collections::HashMap, sync::Arc};
use async_trait::async_trait;
use mea::rwlock::RwLock;
use bson::{Document, oid::ObjectId};

use pawmart_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::ID_FIELD,
    error::DocumentStoreResult,
    outcome::{DeleteResult, InsertOneResult, UpdateResult},
    query::{Expr, Query},
};

use crate::evaluator::DocumentEvaluator;

type CollectionDocs = Vec<Document>;
type StoreMap = HashMap<String, CollectionDocs>;


/// Thread-safe in-memory document storage backend.
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, allowing
/// it to be shared across async tasks. Clones of the same instance share the
/// same underlying data.
///
/// Queries scan every document in a collection (no indexing).
///
/// # Example
///
/// ```ignore
/// use pawmart_memory::InMemoryStore;
/// use pawmart_core::{backend::StoreBackend, query::Filter};
/// use bson::doc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = InMemoryStore::new();
///
///     let ack = store.insert_one(doc! { "name": "Leash" }, "listing").await?;
///     let found = store.find_one(Filter::id(ack.inserted_id), "listing").await?;
///     assert!(found.is_some());
///
///     Ok(())
/// }
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// collection name -> documents in insertion order
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder
    }
}

/// Index of the first document in `docs` matching `filter`.
fn position_of(docs: &[Document], filter: &Expr) -> DocumentStoreResult<Option<usize>> {
    for (index, doc) in docs.iter().enumerate() {
        if DocumentEvaluator::matches(doc, Some(filter))? {
            return Ok(Some(index));
        }
    }

    Ok(None)
}


#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn insert_one(&self, document: Document, collection: &str) -> DocumentStoreResult<InsertOneResult> {
        let id = ObjectId::new();

        // Identity first, like a database-assigned _id
        let mut stored = Document::new();
        stored.insert(ID_FIELD, id);
        for (key, value) in document {
            stored.insert(key, value);
        }

        self.store
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(stored);

        Ok(InsertOneResult::new(id))
    }

    async fn find(&self, query: Query, collection: &str) -> DocumentStoreResult<Vec<Document>> {
        let store = self.store.read().await;
        let docs = match store.get(collection) {
            Some(docs) => docs,
            None => return Ok(vec![]),
        };

        let mut results = Vec::new();
        let limit = query.limit.unwrap_or(usize::MAX);

        for doc in docs {
            if results.len() >= limit {
                break;
            }
            if DocumentEvaluator::matches(doc, query.filter.as_ref())? {
                results.push(doc.clone());
            }
        }

        Ok(results)
    }

    async fn find_one(&self, filter: Expr, collection: &str) -> DocumentStoreResult<Option<Document>> {
        let store = self.store.read().await;
        let docs = match store.get(collection) {
            Some(docs) => docs,
            None => return Ok(None),
        };

        Ok(
            position_of(docs, &filter)?
                .map(|index| docs[index].clone())
        )
    }

    async fn update_one(
        &self,
        filter: Expr,
        fields: Document,
        collection: &str,
    ) -> DocumentStoreResult<UpdateResult> {
        let mut store = self.store.write().await;
        let docs = match store.get_mut(collection) {
            Some(docs) => docs,
            None => return Ok(UpdateResult::new(0, 0)),
        };

        let Some(index) = position_of(docs, &filter)? else {
            return Ok(UpdateResult::new(0, 0));
        };

        let target = &mut docs[index];
        let mut modified = false;

        for (key, value) in fields {
            if target.get(&key) != Some(&value) {
                target.insert(key, value);
                modified = true;
            }
        }

        Ok(UpdateResult::new(1, u64::from(modified)))
    }

    async fn delete_one(&self, filter: Expr, collection: &str) -> DocumentStoreResult<DeleteResult> {
        let mut store = self.store.write().await;
        let docs = match store.get_mut(collection) {
            Some(docs) => docs,
            None => return Ok(DeleteResult::new(0)),
        };

        match position_of(docs, &filter)? {
            Some(index) => {
                docs.remove(index);
                Ok(DeleteResult::new(1))
            },
            None => Ok(DeleteResult::new(0)),
        }
    }

    async fn ping(&self) -> DocumentStoreResult<()> {
        Ok(())
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds and returns a new [`InMemoryStore`] instance.
    ///
    /// This always succeeds and returns a freshly initialized store.
    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use pawmart_core::query::Filter;

    #[tokio::test]
    async fn insert_assigns_identity_first() {
        let store = InMemoryStore::new();

        let ack = store.insert_one(doc! { "name": "Leash" }, "listing").await.unwrap();
        let found = store
            .find_one(Filter::id(ack.inserted_id), "listing")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found, doc! { "_id": ack.inserted_id, "name": "Leash" });
        assert_eq!(found.keys().next().map(String::as_str), Some("_id"));
    }

    #[tokio::test]
    async fn find_keeps_insertion_order_and_limit() {
        let store = InMemoryStore::new();
        for n in 0..8 {
            store.insert_one(doc! { "n": n }, "listing").await.unwrap();
        }

        let docs = store
            .find(Query::builder().limit(6).build(), "listing")
            .await
            .unwrap();

        let ns: Vec<i32> = docs.iter().map(|d| d.get_i32("n").unwrap()).collect();
        assert_eq!(ns, vec![0, 1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn missing_collection_reads_as_empty() {
        let store = InMemoryStore::new();

        assert!(store.find(Query::all(), "order").await.unwrap().is_empty());
        assert!(store.find_one(Filter::id(ObjectId::new()), "order").await.unwrap().is_none());
        assert_eq!(
            store.update_one(Filter::id(ObjectId::new()), doc! { "a": 1 }, "order").await.unwrap(),
            UpdateResult::new(0, 0)
        );
        assert_eq!(
            store.delete_one(Filter::id(ObjectId::new()), "order").await.unwrap(),
            DeleteResult::new(0)
        );
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let store = InMemoryStore::new();
        let ack = store
            .insert_one(doc! { "name": "Leash", "email": "a@x.com" }, "listing")
            .await
            .unwrap();

        let result = store
            .update_one(Filter::id(ack.inserted_id), doc! { "name": "Leash XL", "price": 9 }, "listing")
            .await
            .unwrap();
        assert_eq!(result, UpdateResult::new(1, 1));

        let found = store.find_one(Filter::id(ack.inserted_id), "listing").await.unwrap().unwrap();
        assert_eq!(
            found,
            doc! { "_id": ack.inserted_id, "name": "Leash XL", "email": "a@x.com", "price": 9 }
        );
    }

    #[tokio::test]
    async fn update_with_same_values_matches_without_modifying() {
        let store = InMemoryStore::new();
        let ack = store.insert_one(doc! { "name": "Leash" }, "listing").await.unwrap();

        let result = store
            .update_one(Filter::id(ack.inserted_id), doc! { "name": "Leash" }, "listing")
            .await
            .unwrap();

        assert_eq!(result, UpdateResult::new(1, 0));
    }

    #[tokio::test]
    async fn delete_removes_only_first_match() {
        let store = InMemoryStore::new();
        store.insert_one(doc! { "email": "a@x.com" }, "listing").await.unwrap();
        store.insert_one(doc! { "email": "a@x.com" }, "listing").await.unwrap();

        let result = store.delete_one(Filter::eq("email", "a@x.com"), "listing").await.unwrap();
        assert_eq!(result.deleted_count, 1);

        let left = store.find(Query::all(), "listing").await.unwrap();
        assert_eq!(left.len(), 1);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryStore::new();
        let clone = store.clone();

        store.insert_one(doc! { "total": 20 }, "order").await.unwrap();

        assert_eq!(clone.find(Query::all(), "order").await.unwrap().len(), 1);
    }
}
