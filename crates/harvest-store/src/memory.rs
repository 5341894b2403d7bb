//! In-memory [`StoreBackend`], used by tests and demos.
//!
//! Rows are kept in insertion order and sorted newest first on read with a
//! stable sort, so equal timestamps keep insertion order. The backend can be
//! switched into a failing mode to exercise persistence errors.
//!
//! Timestamps are truncated to whole microseconds, the precision SQLite
//! stores, so ordering and equality match the database backend.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use harvest_core::{Item, ItemFields, NewOrder, Order, OrderStatus};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::{ItemFilter, OrderFilter, StoreBackend};
use crate::error::{BackendError, BackendResult};

fn stored_timestamp(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(6)
}

#[derive(Debug, Default)]
struct Tables {
    items: Vec<Item>,
    orders: Vec<Order>,
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the given items already stored.
    pub fn with_items(items: Vec<Item>) -> Self {
        MemoryBackend {
            tables: RwLock::new(Tables {
                items,
                orders: Vec::new(),
            }),
            unavailable: AtomicBool::new(false),
        }
    }

    /// While set, every operation fails with a [`BackendError`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn item_count(&self) -> usize {
        self.tables.read().await.items.len()
    }

    pub async fn order_count(&self) -> usize {
        self.tables.read().await.orders.len()
    }

    fn check_available(&self) -> BackendResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(BackendError::new("memory backend is unavailable"));
        }
        Ok(())
    }
}

fn newest_first<T>(
    rows: impl Iterator<Item = T>,
    key: impl Fn(&T) -> DateTime<Utc>,
) -> Vec<T> {
    let mut rows: Vec<T> = rows.collect();
    // Stable: equal timestamps stay in insertion order.
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
    rows
}

#[async_trait]
impl StoreBackend for MemoryBackend {
    async fn select_items(&self, filter: &ItemFilter) -> BackendResult<Vec<Item>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(newest_first(
            tables.items.iter().filter(|i| filter.matches(i)).cloned(),
            |i| i.created_at,
        ))
    }

    async fn insert_item(&self, fields: &ItemFields) -> BackendResult<Item> {
        self.check_available()?;
        let now = stored_timestamp(Utc::now());
        let item = Item {
            id: Uuid::new_v4().to_string(),
            name: fields.name.clone(),
            category: fields.category,
            price_cents: fields.price_cents,
            unit: fields.unit.clone(),
            description: fields.description.clone(),
            image: fields.image.clone(),
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.items.push(item.clone());
        Ok(item)
    }

    async fn update_item(&self, id: &str, fields: &ItemFields) -> BackendResult<Option<Item>> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let Some(item) = tables.items.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };
        item.name = fields.name.clone();
        item.category = fields.category;
        item.price_cents = fields.price_cents;
        item.unit = fields.unit.clone();
        item.description = fields.description.clone();
        item.image = fields.image.clone();
        item.updated_at = stored_timestamp(Utc::now());
        Ok(Some(item.clone()))
    }

    async fn delete_item(&self, id: &str) -> BackendResult<bool> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let before = tables.items.len();
        tables.items.retain(|i| i.id != id);
        Ok(tables.items.len() != before)
    }

    async fn select_orders(&self, filter: &OrderFilter) -> BackendResult<Vec<Order>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(newest_first(
            tables.orders.iter().filter(|o| filter.matches(o)).cloned(),
            |o| o.created_at,
        ))
    }

    async fn insert_order(&self, order: &NewOrder) -> BackendResult<Order> {
        self.check_available()?;
        let mut order = order.clone();
        order.created_at = stored_timestamp(order.created_at);
        let order = order.into_order(Uuid::new_v4().to_string());
        self.tables.write().await.orders.push(order.clone());
        Ok(order)
    }

    async fn update_order_status(
        &self,
        id: &str,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> BackendResult<Option<Order>> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let Some(order) = tables.orders.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        order.status = status;
        order.updated_at = stored_timestamp(updated_at);
        Ok(Some(order.clone()))
    }
}
