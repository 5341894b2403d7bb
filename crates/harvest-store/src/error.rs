//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Backend failure (sqlx, lock, transport)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BackendError  ← opaque, carries the source                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError::Persistence   (unmodified, no retry)                      │
//! │                                                                         │
//! │  Bad input ──► StoreError::Validation  (before any backend call)       │
//! │  Unknown id ─► StoreError::NotFound                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::error::Error as StdError;

use harvest_core::ValidationError;
use thiserror::Error;

/// A failure reported by a [`StoreBackend`](crate::StoreBackend).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BackendError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        BackendError {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an underlying error, keeping it reachable through `source()`.
    pub fn with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        BackendError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Errors returned by the catalog, checkout and order status services.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input was rejected before reaching the backend.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No item or order with this id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The backend failed to read or write.
    #[error("Persistence failed: {0}")]
    Persistence(#[from] BackendError),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, StoreError::Persistence(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = BackendError::with_source("insert failed", io);
        assert_eq!(err.to_string(), "insert failed");
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("disk full"));
    }

    #[test]
    fn test_store_error_classification() {
        let err: StoreError = ValidationError::EmptyCart.into();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Cannot place an order with an empty cart");

        let err = StoreError::not_found("Order", "abc");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Order not found: abc");

        let err: StoreError = BackendError::new("connection reset").into();
        assert!(err.is_persistence());
        assert_eq!(err.to_string(), "Persistence failed: connection reset");
    }
}
