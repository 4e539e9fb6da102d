use async_trait::async_trait;
use futures::TryStreamExt;
use bson::{Document, doc, oid::ObjectId};
use mongodb::{
    Client, Collection as MongoCollection,
    options::{ClientOptions, FindOptions, ServerApi, ServerApiVersion},
};
use pawmart_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::ID_FIELD,
    error::{DocumentStoreError, DocumentStoreResult},
    outcome::{DeleteResult, InsertOneResult, UpdateResult},
    query::{Expr, Query, QueryVisitor},
};

use crate::{sanitizer::KeySanitizer, query::MongoQueryTranslator};


#[derive(Debug, Clone)]
pub struct MongoDbStore {
    client: Client,
    database: String,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(&KeySanitizer::sanitize_key(collection_name))
    }

    fn translate(filter: &Expr) -> DocumentStoreResult<Document> {
        MongoQueryTranslator.visit_expr(filter)
    }
}

fn backend_error(err: mongodb::error::Error) -> DocumentStoreError {
    DocumentStoreError::Backend(err.to_string())
}

#[async_trait]
impl StoreBackend for MongoDbStore {
    async fn insert_one(&self, document: Document, collection: &str) -> DocumentStoreResult<InsertOneResult> {
        let id = ObjectId::new();

        let mut prepared = Document::new();
        prepared.insert(ID_FIELD, id);
        for (key, value) in KeySanitizer::sanitize_document(document) {
            prepared.insert(key, value);
        }

        self.get_collection(collection)
            .insert_one(prepared)
            .await
            .map_err(backend_error)?;

        Ok(InsertOneResult::new(id))
    }

    async fn find(&self, query: Query, collection: &str) -> DocumentStoreResult<Vec<Document>> {
        let mut options = FindOptions::default();

        if let Some(limit) = query.limit {
            options.limit = Some(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let filter = match &query.filter {
            Some(expr) => Self::translate(expr)?,
            None => doc! {},
        };

        Ok(
            self.get_collection(collection)
                .find(filter)
                .with_options(options)
                .await
                .map_err(backend_error)?
                .try_collect::<Vec<Document>>()
                .await
                .map_err(backend_error)?
                .into_iter()
                .map(KeySanitizer::restore_document)
                .collect()
        )
    }

    async fn find_one(&self, filter: Expr, collection: &str) -> DocumentStoreResult<Option<Document>> {
        Ok(
            self.get_collection(collection)
                .find_one(Self::translate(&filter)?)
                .await
                .map_err(backend_error)?
                .map(KeySanitizer::restore_document)
        )
    }

    async fn update_one(
        &self,
        filter: Expr,
        fields: Document,
        collection: &str,
    ) -> DocumentStoreResult<UpdateResult> {
        let filter = Self::translate(&filter)?;

        // Servers before 5.0 reject an empty $set
        if fields.is_empty() {
            let matched = self.get_collection(collection)
                .find_one(filter)
                .await
                .map_err(backend_error)?
                .is_some();

            return Ok(UpdateResult::new(u64::from(matched), 0));
        }

        let result = self.get_collection(collection)
            .update_one(
                filter,
                doc! { "$set": KeySanitizer::sanitize_document(fields) },
            )
            .await
            .map_err(backend_error)?;

        Ok(UpdateResult::new(result.matched_count, result.modified_count))
    }

    async fn delete_one(&self, filter: Expr, collection: &str) -> DocumentStoreResult<DeleteResult> {
        let result = self.get_collection(collection)
            .delete_one(Self::translate(&filter)?)
            .await
            .map_err(backend_error)?;

        Ok(DeleteResult::new(result.deleted_count))
    }

    async fn ping(&self) -> DocumentStoreResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| DocumentStoreError::Unavailable(e.to_string()))?;

        Ok(())
    }

    async fn shutdown(&self) -> DocumentStoreResult<()> {
        self.client.clone().shutdown().await;

        Ok(())
    }
}

pub struct MongoDbStoreBuilder {
    dsn: String,
    database: String,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
        }
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    /// Parses the connection string and creates the client.
    ///
    /// The client pins Stable API v1 in strict mode. No connection is made
    /// here; the driver connects lazily on first use.
    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        let mut options = ClientOptions::parse(&self.dsn)
            .await
            .map_err(|e| DocumentStoreError::Initialization(e.to_string()))?;

        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build()
        );

        Ok(MongoDbStore::new(
            Client::with_options(options)
                .map_err(|e| DocumentStoreError::Initialization(e.to_string()))?,
            self.database,
        ))
    }
}
