//! Convenient re-exports of commonly used store types.
//!
//! ```ignore
//! use pawmart_store::prelude::*;
//! ```

pub use pawmart_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    collection::{Collection, TypedCollection},
    document::{Document, ID_FIELD, take_identity},
    error::{DocumentStoreError, DocumentStoreResult},
    outcome::{DeleteResult, InsertOneResult, UpdateResult},
    query::{Expr, Filter, Query, QueryBuilder, QueryVisitor},
    store::DocumentStore,
};
