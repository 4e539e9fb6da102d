//! Route handlers. Each performs exactly one store operation.

pub mod health;
pub mod listings;
pub mod orders;

use bson::oid::ObjectId;

use crate::error::ApiError;

/// Parses an `id` path parameter into a store identity.
pub(crate) fn parse_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::InvalidId(raw.to_string()))
}
