//! [`StoreBackend`] implementation for [`Database`].
//!
//! Each call delegates to a repository; [`DbError`](crate::DbError) is
//! converted into the store's opaque `BackendError` with the source kept.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use harvest_core::{Item, ItemFields, NewOrder, Order, OrderStatus};
use harvest_store::{BackendResult, ItemFilter, OrderFilter, StoreBackend};

use crate::pool::Database;

#[async_trait]
impl StoreBackend for Database {
    async fn select_items(&self, filter: &ItemFilter) -> BackendResult<Vec<Item>> {
        Ok(self.items().list(filter).await?)
    }

    async fn insert_item(&self, fields: &ItemFields) -> BackendResult<Item> {
        Ok(self.items().insert(fields).await?)
    }

    async fn update_item(&self, id: &str, fields: &ItemFields) -> BackendResult<Option<Item>> {
        Ok(self.items().update(id, fields).await?)
    }

    async fn delete_item(&self, id: &str) -> BackendResult<bool> {
        Ok(self.items().delete(id).await?)
    }

    async fn select_orders(&self, filter: &OrderFilter) -> BackendResult<Vec<Order>> {
        Ok(self.orders().list(filter).await?)
    }

    async fn insert_order(&self, order: &NewOrder) -> BackendResult<Order> {
        Ok(self.orders().insert(order).await?)
    }

    async fn update_order_status(
        &self,
        id: &str,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> BackendResult<Option<Order>> {
        Ok(self.orders().update_status(id, status, updated_at).await?)
    }
}
