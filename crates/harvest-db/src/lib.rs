//! # harvest-db: SQLite Backend
//!
//! [`Database`] implements the harvest-store
//! [`StoreBackend`](harvest_store::StoreBackend) contract on a local SQLite
//! file, so the storefront services persist without knowing any SQL.
//!
//! ```text
//! Storefront services ──dyn StoreBackend──► Database
//!                                             ├── ItemRepository   items
//!                                             ├── OrderRepository  orders, order_lines
//!                                             └── migrations       embedded schema
//! ```
//!
//! - [`pool`]: `DbConfig`, `Database`, WAL and foreign keys
//! - [`migrations`]: embedded schema and its status
//! - [`repository`]: one repository per collection
//! - [`sample`]: the produce catalog used for seeding
//! - [`error`]: `DbError` and its conversion into `BackendError`
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use harvest_core::StatusPolicy;
//! use harvest_db::{Database, DbConfig};
//! use harvest_store::Storefront;
//!
//! let db = Arc::new(Database::new(DbConfig::new("./harvest.db")).await?);
//! let store = Storefront::new(db, StatusPolicy::default());
//! let items = store.catalog().list_items().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod sample;
mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use migrations::MigrationStatus;
pub use pool::{Database, DbConfig, DbLocation};
pub use repository::item::ItemRepository;
pub use repository::order::OrderRepository;
pub use sample::sample_catalog;
