//! # Store Backend Contract
//!
//! The CRUD surface the services need from storage, one group of methods
//! per collection (`items`, `orders`, `order_lines`).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Collection    select            insert           update      delete   │
//! │  ──────────    ──────            ──────           ──────      ──────   │
//! │  items         select_items      insert_item      update_item delete_  │
//! │                                                               item     │
//! │  orders +      select_orders     insert_order     update_order_status  │
//! │  order_lines   (lines attached)  (header + lines                        │
//! │                                   in ONE call)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `insert_order` takes the header and its lines together. Implementations
//! must make them appear together or not at all.
//!
//! ## Ordering
//! `select_items` and `select_orders` return rows newest first; rows with
//! equal timestamps keep the backend's insertion order.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use harvest_core::{Category, Item, ItemFields, NewOrder, Order, OrderStatus};

use crate::error::BackendResult;

/// Filter for [`StoreBackend::select_items`]. Empty filter selects all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub id: Option<String>,
    pub category: Option<Category>,
}

impl ItemFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: impl Into<String>) -> Self {
        ItemFilter {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn by_category(category: Category) -> Self {
        ItemFilter {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.id.as_deref().map_or(true, |id| item.id == id)
            && self.category.map_or(true, |c| item.category == c)
    }
}

/// Filter for [`StoreBackend::select_orders`]. Empty filter selects all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub id: Option<String>,
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: impl Into<String>) -> Self {
        OrderFilter {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn by_status(status: OrderStatus) -> Self {
        OrderFilter {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn matches(&self, order: &Order) -> bool {
        self.id.as_deref().map_or(true, |id| order.id == id)
            && self.status.map_or(true, |s| order.status == s)
    }
}

/// Storage used by the storefront services.
///
/// Every method may fail with a [`BackendError`](crate::BackendError); the
/// services surface it as `StoreError::Persistence` without retrying.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Items matching `filter`, newest first.
    async fn select_items(&self, filter: &ItemFilter) -> BackendResult<Vec<Item>>;

    /// Inserts an item; the backend assigns `id` and timestamps.
    async fn insert_item(&self, fields: &ItemFields) -> BackendResult<Item>;

    /// Overwrites the writable fields. `Ok(None)` when `id` is unknown.
    async fn update_item(&self, id: &str, fields: &ItemFields) -> BackendResult<Option<Item>>;

    /// Deletes an item. `Ok(false)` when `id` is unknown.
    async fn delete_item(&self, id: &str) -> BackendResult<bool>;

    /// Orders matching `filter` with their lines attached, newest first.
    async fn select_orders(&self, filter: &OrderFilter) -> BackendResult<Vec<Order>>;

    /// Inserts the order header and all of its lines atomically; the
    /// backend assigns the order id.
    async fn insert_order(&self, order: &NewOrder) -> BackendResult<Order>;

    /// Sets status and `updated_at`. `Ok(None)` when `id` is unknown.
    async fn update_order_status(
        &self,
        id: &str,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> BackendResult<Option<Order>>;
}

/// Backend handle shared by the services.
pub type SharedBackend = Arc<dyn StoreBackend>;
