//! Error types and result types for document store operations.
//!
//! Every backend reports failures through [`DocumentStoreError`]. Use
//! [`DocumentStoreResult<T>`] as the return type for fallible operations.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a document store.
///
/// A lookup that matches nothing is not an error: `find_one` yields `None` and
/// the write operations report zero counts instead.
#[derive(Error, Debug)]
pub enum DocumentStoreError {
    /// Serialization/deserialization error when converting between document formats (BSON, JSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during store initialization or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
    /// The backend could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// A specialized `Result` type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

impl From<BsonError> for DocumentStoreError {
    fn from(err: BsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for DocumentStoreError {
    fn from(err: SerdeJsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = DocumentStoreError::Backend("connection reset".to_string());
        assert_eq!(err.to_string(), "Backend error: connection reset");

        let err = DocumentStoreError::Unavailable("no primary".to_string());
        assert_eq!(err.to_string(), "Store unavailable: no primary");
    }

    #[test]
    fn serde_json_errors_become_serialization_errors() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = DocumentStoreError::from(json_err);
        assert!(matches!(err, DocumentStoreError::Serialization(_)));
    }
}
