//! # Error Types
//!
//! Validation errors raised by harvest-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  harvest-core   ValidationError  - rejected input, never hits storage  │
//! │  harvest-store  StoreError       - Validation | NotFound | Persistence │
//! │  harvest-db     DbError          - sqlx failures                       │
//! │  storefront     ApiError         - what the HTTP client sees           │
//! │                                                                         │
//! │  Flow: ValidationError → StoreError → ApiError → Frontend              │
//! │        DbError → BackendError → StoreError::Persistence → ApiError     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Input validation errors.
///
/// Detected before any call to the store, so a `ValidationError` always
/// means nothing was written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Status change rejected by the configured status policy.
    #[error("Order status cannot change from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// Checkout was attempted with nothing in the cart.
    #[error("Cannot place an order with an empty cart")]
    EmptyCart,
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::required("email").to_string(),
            "email is required"
        );
        assert_eq!(
            ValidationError::TooLong {
                field: "name".to_string(),
                max: 200
            }
            .to_string(),
            "name must be at most 200 characters"
        );
        assert_eq!(
            ValidationError::EmptyCart.to_string(),
            "Cannot place an order with an empty cart"
        );
    }
}
