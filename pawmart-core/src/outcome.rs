//! Acknowledgments returned by write operations.
//!
//! These mirror what document databases report back for single-document
//! writes. They serialize in camelCase with identities rendered as hex
//! strings, so they can be handed to HTTP clients unchanged.

use bson::oid::ObjectId;
use serde::{Serialize, Serializer};

/// Result of inserting a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    /// Whether the write was acknowledged by the store.
    pub acknowledged: bool,
    /// Identity assigned to the new document.
    #[serde(serialize_with = "object_id_as_hex")]
    pub inserted_id: ObjectId,
}

impl InsertOneResult {
    pub fn new(inserted_id: ObjectId) -> Self {
        Self { acknowledged: true, inserted_id }
    }
}

/// Result of a filtered single-document update.
///
/// `matched_count` is 0 or 1. `modified_count` is 0 when the document matched
/// but every field already held the requested value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    #[serde(serialize_with = "optional_object_id_as_hex")]
    pub upserted_id: Option<ObjectId>,
}

impl UpdateResult {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_count: 0,
            upserted_id: None,
        }
    }
}

/// Result of a filtered single-document delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self { acknowledged: true, deleted_count }
    }
}

fn object_id_as_hex<S: Serializer>(id: &ObjectId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&id.to_hex())
}

fn optional_object_id_as_hex<S: Serializer>(
    id: &Option<ObjectId>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match id {
        Some(id) => serializer.serialize_str(&id.to_hex()),
        None => serializer.serialize_none(),
    }
}
