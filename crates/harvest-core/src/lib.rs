//! # harvest-core: Pure Business Logic for the Harvest Storefront
//!
//! Everything in this crate is deterministic and free of I/O: the money
//! type, the catalog and order domain types, input validation and the
//! session cart.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Harvest Storefront Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 storefront (HTTP front door)                    │   │
//! │  │    /items ──► /cart ──► /orders ──► /orders/{id}/status         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        harvest-store (Catalog, Checkout, Order Status)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ harvest-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │   Item    │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │   Order   │  │           │  │ CartLine  │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Order, OrderStatus, CustomerInfo)
//! - [`money`] - Integer money in cents
//! - [`cart`] - The session cart and its derived totals
//! - [`error`] - Validation errors
//! - [`validation`] - Field rules for catalog items and checkout
//!
//! ## Example Usage
//!
//! ```rust
//! use harvest_core::money::Money;
//!
//! let carrots = Money::from_cents(199); // $1.99 per kg
//! let line = carrots.times(5);
//! assert_eq!(line.to_string(), "$9.95");
//! ```

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartAck, CartLine, CartSummary};
pub use error::{ValidationError, ValidationResult};
pub use money::Money;
pub use types::*;
