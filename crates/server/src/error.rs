//! Unified error handling for the HTTP surface.
//!
//! Route handlers return `Result<T, AppError>`; the `IntoResponse` impl maps
//! each error to a status code and a JSON `{"error": ...}` body. Store-level
//! detail is logged, never sent to the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use roster_core::UserIdError;

use crate::db::StoreError;

/// Application-level error type for the user API.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request body could not be decoded.
    #[error("Invalid request")]
    InvalidRequest,

    /// The path identifier is not a valid user id.
    #[error("Invalid ID format")]
    InvalidId(#[from] UserIdError),

    /// No user matched the identifier.
    #[error("User not found")]
    NotFound,

    /// The store failed; `public` is all the client sees.
    #[error("{public}")]
    Store {
        public: &'static str,
        source: StoreError,
    },
}

impl AppError {
    /// Wrap a store failure with the message the client is allowed to see.
    #[must_use]
    pub const fn store(public: &'static str, source: StoreError) -> Self {
        Self::Store { public, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Store { public, source } = &self {
            tracing::error!(error = %source, "{public}");
        }

        let status = match &self {
            Self::InvalidRequest | Self::InvalidId(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        assert_eq!(AppError::InvalidRequest.to_string(), "Invalid request");
        assert_eq!(AppError::NotFound.to_string(), "User not found");
        assert_eq!(
            AppError::store("Failed to create user", StoreError::Write("boom".to_string()))
                .to_string(),
            "Failed to create user"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(get_status(AppError::InvalidRequest), StatusCode::BAD_REQUEST);
        assert_eq!(
            get_status(AppError::InvalidId(UserIdError::InvalidFormat)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(get_status(AppError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            get_status(AppError::store(
                "Failed to fetch users",
                StoreError::Read("boom".to_string())
            )),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_detail_stays_server_side() {
        let err = AppError::store(
            "Failed to update user",
            StoreError::Write("mongodb://secret-host refused".to_string()),
        );
        // The client-facing message carries no store detail.
        assert_eq!(err.to_string(), "Failed to update user");
    }
}
