//! # harvest-store: Store Contract and Services
//!
//! The cart/order state manager of the Harvest storefront. Every read and
//! write goes through the [`StoreBackend`] contract; the services in this
//! crate validate input first, call the backend, and only then publish a
//! [`StoreEvent`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     harvest-store (THIS CRATE)                          │
//! │                                                                         │
//! │   ┌──────────────┐   ┌────────────────┐   ┌────────────────────┐       │
//! │   │ CatalogStore │   │ OrderAssembler │   │ OrderStatusStore   │       │
//! │   │ list/add/    │   │ place_order(   │   │ list/get/          │       │
//! │   │ update/delete│   │  &mut Cart, ..)│   │ update_status      │       │
//! │   └──────┬───────┘   └───────┬────────┘   └─────────┬──────────┘       │
//! │          │                   │                      │                   │
//! │          └──────────┬────────┴──────────────────────┘                   │
//! │                     ▼                                                   │
//! │          ┌─────────────────────┐        ┌──────────────┐               │
//! │          │ dyn StoreBackend    │        │  EventBus    │──► observers  │
//! │          └──────────┬──────────┘        └──────────────┘               │
//! │                     │                                                   │
//! └─────────────────────┼───────────────────────────────────────────────────┘
//!                       ▼
//!        MemoryBackend (tests)  |  harvest_db::Database (SQLite)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use harvest_core::{Cart, Category, CustomerInfo, ItemFields, StatusPolicy};
//! use harvest_store::{MemoryBackend, Storefront};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), harvest_store::StoreError> {
//! let store = Storefront::new(Arc::new(MemoryBackend::new()), StatusPolicy::default());
//!
//! let carrots = store.catalog().add_item(ItemFields {
//!     name: "Fresh Carrots".into(),
//!     category: Category::Vegetable,
//!     price_cents: 199,
//!     unit: "kg".into(),
//!     description: String::new(),
//!     image: String::new(),
//! }).await?;
//!
//! let mut cart = Cart::new();
//! cart.add_item(&carrots, 5);
//!
//! let order_id = store.checkout().place_order(&mut cart, CustomerInfo {
//!     name: "Ada".into(),
//!     email: "ada@example.com".into(),
//!     phone: "555-0100".into(),
//!     address: "1 Orchard Lane".into(),
//! }).await?;
//!
//! assert!(cart.is_empty());
//! assert!(store.orders().get_order_by_id(&order_id).await?.is_some());
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod events;
pub mod memory;
pub mod orders;

use std::sync::Arc;

use harvest_core::StatusPolicy;

pub use backend::{ItemFilter, OrderFilter, SharedBackend, StoreBackend};
pub use catalog::CatalogStore;
pub use checkout::OrderAssembler;
pub use error::{BackendError, BackendResult, StoreError, StoreResult};
pub use events::{EventBus, StoreEvent};
pub use memory::MemoryBackend;
pub use orders::OrderStatusStore;

/// The three services wired to one backend and one event bus.
#[derive(Clone)]
pub struct Storefront {
    catalog: CatalogStore,
    checkout: OrderAssembler,
    orders: OrderStatusStore,
    events: EventBus,
}

impl Storefront {
    pub fn new(backend: SharedBackend, policy: StatusPolicy) -> Self {
        let events = EventBus::default();
        Storefront {
            catalog: CatalogStore::new(backend.clone(), events.clone()),
            checkout: OrderAssembler::new(backend.clone(), events.clone()),
            orders: OrderStatusStore::new(backend, events.clone(), policy),
            events,
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn checkout(&self) -> &OrderAssembler {
        &self.checkout
    }

    pub fn orders(&self) -> &OrderStatusStore {
        &self.orders
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("policy", &self.orders.policy())
            .field("subscribers", &self.events.subscriber_count())
            .finish()
    }
}

/// Convenience constructor used by tests and demos.
pub fn in_memory() -> (Storefront, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new());
    let store = Storefront::new(backend.clone(), StatusPolicy::default());
    (store, backend)
}
