//! Core traits for typed documents.
//!
//! Stored documents are open BSON maps. A type implementing [`Document`] picks
//! out the fields it recognizes and keeps the rest as a passthrough remainder,
//! so "store whatever is sent" still holds while the recognized fields get
//! real types.

use bson::{Bson, Document as BsonDocument, oid::ObjectId};
use std::fmt::Debug;

use crate::error::DocumentStoreResult;

/// Name of the store-assigned identity field.
pub const ID_FIELD: &str = "_id";

/// Core trait that all typed documents must implement.
///
/// # Example
///
/// ```ignore
/// use pawmart_core::document::{Document, take_identity};
/// use bson::{Document as BsonDocument, oid::ObjectId};
///
/// #[derive(Debug, Clone)]
/// pub struct Note {
///     pub id: Option<ObjectId>,
///     pub fields: BsonDocument,
/// }
///
/// impl Document for Note {
///     fn collection_name() -> &'static str { "notes" }
///     fn id(&self) -> Option<&ObjectId> { self.id.as_ref() }
///
///     fn from_document(mut document: BsonDocument) -> DocumentStoreResult<Self> {
///         let id = take_identity(&mut document);
///         Ok(Self { id, fields: document })
///     }
///
///     fn into_document(self) -> BsonDocument { self.fields }
/// }
/// ```
pub trait Document: Send + Sync + Clone + Debug + 'static {
    /// Returns the name of the collection this document belongs to.
    fn collection_name() -> &'static str;

    /// Returns the store-assigned identity, if the document has been stored.
    fn id(&self) -> Option<&ObjectId>;

    /// Builds the typed document from a raw BSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if a recognized field has an unusable value.
    fn from_document(document: BsonDocument) -> DocumentStoreResult<Self>;

    /// Flattens the typed document back into a raw BSON document.
    ///
    /// The identity is included when present.
    fn into_document(self) -> BsonDocument;
}

/// Removes the identity field from a raw document.
///
/// Returns the identity when it was an `ObjectId`; an identity of any other
/// BSON type is discarded, since only the store assigns identities.
pub fn take_identity(document: &mut BsonDocument) -> Option<ObjectId> {
    match document.remove(ID_FIELD) {
        Some(Bson::ObjectId(id)) => Some(id),
        _ => None,
    }
}
