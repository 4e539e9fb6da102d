//! Collection handles over the in-memory backend.

use bson::{Bson, Document as BsonDocument, doc, oid::ObjectId};
use pawmart_store::{memory::InMemoryStore, prelude::*};

#[derive(Debug, Clone, PartialEq)]
struct Note {
    id: Option<ObjectId>,
    fields: BsonDocument,
}

impl Document for Note {
    fn collection_name() -> &'static str {
        "notes"
    }

    fn id(&self) -> Option<&ObjectId> {
        self.id.as_ref()
    }

    fn from_document(mut document: BsonDocument) -> DocumentStoreResult<Self> {
        let id = take_identity(&mut document);
        Ok(Self { id, fields: document })
    }

    fn into_document(self) -> BsonDocument {
        let mut document = BsonDocument::new();
        if let Some(id) = self.id {
            document.insert(ID_FIELD, id);
        }
        for (key, value) in self.fields {
            document.insert(key, value);
        }
        document
    }
}

fn store() -> DocumentStore {
    DocumentStore::new(InMemoryStore::new())
}

#[tokio::test]
async fn insert_discards_caller_identity() {
    let store = store();
    let listings = store.collection("listing");
    let foreign = ObjectId::new();

    let ack = listings.insert_one(doc! { "_id": foreign, "name": "Leash" }).await.unwrap();

    assert_ne!(ack.inserted_id, foreign);
    assert!(listings.find_one(Filter::id(foreign)).await.unwrap().is_none());
    assert_eq!(
        listings.find_one(Filter::id(ack.inserted_id)).await.unwrap(),
        Some(doc! { "_id": ack.inserted_id, "name": "Leash" })
    );
}

#[tokio::test]
async fn update_never_rewrites_identity() {
    let store = store();
    let listings = store.collection("listing");
    let ack = listings.insert_one(doc! { "name": "Leash" }).await.unwrap();

    let result = listings
        .update_one(Filter::id(ack.inserted_id), doc! { "_id": ObjectId::new(), "name": "Leash XL" })
        .await
        .unwrap();

    assert_eq!(result, UpdateResult::new(1, 1));
    let stored = listings.find_one(Filter::id(ack.inserted_id)).await.unwrap().unwrap();
    assert_eq!(stored.get("_id"), Some(&Bson::ObjectId(ack.inserted_id)));
    assert_eq!(stored.get_str("name").unwrap(), "Leash XL");
}

#[tokio::test]
async fn typed_collections_convert_documents() {
    let store = store();
    let notes = store.typed_collection::<Note>();
    assert_eq!(notes.name(), "notes");

    let ack = notes
        .insert_one(Note { id: Some(ObjectId::new()), fields: doc! { "text": "hello" } })
        .await
        .unwrap();

    let found = notes.find(Query::all()).await.unwrap();
    assert_eq!(found, vec![Note { id: Some(ack.inserted_id), fields: doc! { "text": "hello" } }]);

    let deleted = notes.delete_one(Filter::id(ack.inserted_id)).await.unwrap();
    assert_eq!(deleted, DeleteResult::new(1));
    assert!(notes.find_one(Filter::id(ack.inserted_id)).await.unwrap().is_none());
}

#[tokio::test]
async fn collections_are_isolated_and_store_clones_share_data() {
    let store = store();
    let clone = store.clone();

    store.collection("order").insert_one(doc! { "quantity": 1 }).await.unwrap();

    assert_eq!(clone.collection("order").find(Query::all()).await.unwrap().len(), 1);
    assert!(clone.collection("listing").find(Query::all()).await.unwrap().is_empty());
    store.ping().await.unwrap();
    store.shutdown().await.unwrap();
}
