//! # Validation Module
//!
//! Field rules for catalog items and checkout.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form (required inputs, min="0" on price)            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: JSON deserialization (types, enum values)                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE, run by harvest-store before any store call      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: SQLite CHECK / NOT NULL / FOREIGN KEY constraints            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use harvest_core::validation::{validate_email, validate_price_cents};
//!
//! assert!(validate_price_cents(199).is_ok());
//! assert!(validate_email("shopper@example.com").is_ok());
//! assert!(validate_email("shopper").is_err());
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::{CustomerInfo, ItemFields};

const MAX_NAME_LEN: usize = 200;
const MAX_UNIT_LEN: usize = 32;
const MAX_DESCRIPTION_LEN: usize = 2000;
const MAX_IMAGE_LEN: usize = 2048;
const MAX_CONTACT_LEN: usize = 200;
const MAX_ADDRESS_LEN: usize = 500;

// =============================================================================
// String Validators
// =============================================================================

/// Checks that a trimmed value is present and within `max` characters.
fn require_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    check_len(field, value, max)
}

fn check_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates an item name: required, at most 200 characters.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    require_text("name", name, MAX_NAME_LEN)
}

/// Validates a unit label such as "kg" or "bunch".
pub fn validate_unit(unit: &str) -> ValidationResult<()> {
    require_text("unit", unit, MAX_UNIT_LEN)
}

/// Validates an email address.
///
/// ## Rules
/// - Required
/// - Exactly one `@` with text on both sides
/// - No whitespace
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    require_text("email", email, MAX_CONTACT_LEN)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(invalid("must look like name@domain")),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// Zero is allowed (free samples); negative prices are not.
///
/// ```rust
/// use harvest_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-1).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates the fields required to create or update a catalog item.
///
/// ## Rules
/// - name, unit: required
/// - price: >= 0
/// - category: enforced by the type
/// - description, image: optional, length-limited
pub fn validate_item_fields(fields: &ItemFields) -> ValidationResult<()> {
    validate_item_name(&fields.name)?;
    validate_price_cents(fields.price_cents)?;
    validate_unit(&fields.unit)?;
    check_len("description", &fields.description, MAX_DESCRIPTION_LEN)?;
    check_len("image", &fields.image, MAX_IMAGE_LEN)?;
    Ok(())
}

/// Validates the checkout contact block. All four fields are required.
///
/// ## Checkout Flow
/// ```text
/// POST /orders { customer: {...} }
///      │
///      ▼
/// validate_customer_info ← THIS FUNCTION
///      │
///      ├── blank field?  → ValidationError::Required
///      ├── bad email?    → ValidationError::InvalidFormat
///      │
///      └── OK → order assembled and sent to the store
/// ```
pub fn validate_customer_info(customer: &CustomerInfo) -> ValidationResult<()> {
    require_text("customer name", &customer.name, MAX_CONTACT_LEN)?;
    validate_email(&customer.email)?;
    require_text("phone", &customer.phone, MAX_CONTACT_LEN)?;
    require_text("address", &customer.address, MAX_ADDRESS_LEN)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn fields() -> ItemFields {
        ItemFields {
            name: "Fresh Carrots".to_string(),
            category: Category::Vegetable,
            price_cents: 199,
            unit: "kg".to_string(),
            description: String::new(),
            image: String::new(),
        }
    }

    fn customer() -> CustomerInfo {
        CustomerInfo {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            phone: "555-0199".to_string(),
            address: "7 Market Street".to_string(),
        }
    }

    #[test]
    fn test_validate_item_fields() {
        assert!(validate_item_fields(&fields()).is_ok());

        let mut blank_name = fields();
        blank_name.name = "   ".to_string();
        assert_eq!(
            validate_item_fields(&blank_name),
            Err(ValidationError::required("name"))
        );

        let mut negative = fields();
        negative.price_cents = -5;
        assert!(matches!(
            validate_item_fields(&negative),
            Err(ValidationError::OutOfRange { .. })
        ));

        let mut no_unit = fields();
        no_unit.unit = String::new();
        assert_eq!(
            validate_item_fields(&no_unit),
            Err(ValidationError::required("unit"))
        );

        let mut long_name = fields();
        long_name.name = "A".repeat(201);
        assert!(matches!(
            validate_item_fields(&long_name),
            Err(ValidationError::TooLong { max: 200, .. })
        ));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b").is_ok());
        assert!(validate_email(" shopper@example.com ").is_ok());

        assert_eq!(validate_email(""), Err(ValidationError::required("email")));
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@").is_err());
        assert!(validate_email("a@b@c").is_err());
        assert!(validate_email("a b@example.com").is_err());
    }

    #[test]
    fn test_validate_customer_info() {
        assert!(validate_customer_info(&customer()).is_ok());

        let mut no_phone = customer();
        no_phone.phone = " ".to_string();
        assert_eq!(
            validate_customer_info(&no_phone),
            Err(ValidationError::required("phone"))
        );

        let mut no_address = customer();
        no_address.address = String::new();
        assert_eq!(
            validate_customer_info(&no_address),
            Err(ValidationError::required("address"))
        );
    }
}
