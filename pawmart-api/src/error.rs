//! Error type returned by every route handler.
//!
//! Server-side failures are logged with their full detail; clients only see
//! a fixed message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pawmart_store::error::DocumentStoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The `id` path parameter is not a 24-digit hex identity.
    #[error("Invalid listing id: {0}")]
    InvalidId(String),

    /// The body holds a value the store cannot represent.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The store failed while applying a listing update.
    #[error("Update failed: {0}")]
    UpdateFailed(#[source] DocumentStoreError),

    #[error("Store error: {0}")]
    Store(#[from] DocumentStoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::UpdateFailed(_) | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the response body.
    fn public_message(&self) -> String {
        match self {
            Self::InvalidId(_) | Self::InvalidBody(_) => self.to_string(),
            Self::UpdateFailed(_) => "Update failed".to_string(),
            Self::Store(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request error");
        } else {
            tracing::debug!(error = %self, "Rejected request");
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_echo_their_message() {
        let err = ApiError::InvalidId("xyz".to_string());

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "Invalid listing id: xyz");
    }

    #[test]
    fn server_errors_hide_details() {
        let err = ApiError::Store(DocumentStoreError::Backend("socket closed".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Internal server error");

        let err = ApiError::UpdateFailed(DocumentStoreError::Backend("socket closed".to_string()));
        assert_eq!(err.public_message(), "Update failed");
    }
}
