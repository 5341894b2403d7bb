//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Handler: Result<T, ApiError>                                          │
//! │       │                                                                 │
//! │       ├── StoreError::Validation  ──► 400 VALIDATION_ERROR             │
//! │       ├── StoreError::NotFound    ──► 404 NOT_FOUND                    │
//! │       ├── StoreError::Persistence ──► 500 PERSISTENCE_ERROR            │
//! │       │     (details logged, generic message returned)                  │
//! │       └── malformed JSON body     ──► 400 VALIDATION_ERROR             │
//! │                                                                         │
//! │  Body: { "code": "NOT_FOUND", "message": "Order not found: ..." }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use harvest_core::ValidationError;
use harvest_store::StoreError;
use serde::{Deserialize, Serialize};

/// Error body returned by every failing route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,

    /// Resource not found (404)
    NotFound,

    /// Storage failed (500)
    PersistenceError,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::PersistenceError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(e) => e.into(),
            StoreError::NotFound { entity, id } => ApiError::not_found(entity, &id),
            StoreError::Persistence(e) => {
                // Log the actual error but return a generic message
                tracing::error!(error = %e, source = ?std::error::Error::source(&e), "Store operation failed");
                ApiError::new(ErrorCode::PersistenceError, "Storage operation failed")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use harvest_store::BackendError;

    #[test]
    fn test_store_error_mapping() {
        let err = ApiError::from(StoreError::from(ValidationError::EmptyCart));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Cannot place an order with an empty cart");

        let err = ApiError::from(StoreError::not_found("Order", "o-1"));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Order not found: o-1");

        let err = ApiError::from(StoreError::from(BackendError::new("disk I/O error")));
        assert_eq!(err.code, ErrorCode::PersistenceError);
        assert!(!err.message.contains("disk"));
    }

    #[test]
    fn test_error_body_shape() {
        let json = serde_json::to_value(ApiError::not_found("Item", "x")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Item not found: x");
        assert_eq!(ErrorCode::PersistenceError.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
