//! # Order Status Store
//!
//! Placed orders: listing, lookup and status changes.
//!
//! ## Status Changes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  update_status(id, to)                                                 │
//! │       │                                                                 │
//! │       ├── load order ──── unknown id ──► NotFound (nothing written)    │
//! │       │                                                                 │
//! │       ├── policy.check(from, to) ── rejected ──► Validation            │
//! │       │     Unrestricted: any → any                                    │
//! │       │     ForwardOnly:  pending → in-progress → delivered            │
//! │       │                                                                 │
//! │       ├── updated_at = max(now, previous + 1µs)                        │
//! │       │                                                                 │
//! │       └── backend write ──► OrderStatusChanged event                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use harvest_core::{next_update_timestamp, Order, OrderStatus, StatusCounts, StatusPolicy};
use tracing::{debug, info, warn};

use crate::backend::{OrderFilter, SharedBackend};
use crate::error::{StoreError, StoreResult};
use crate::events::{EventBus, StoreEvent};

const ENTITY: &str = "Order";

#[derive(Clone)]
pub struct OrderStatusStore {
    backend: SharedBackend,
    events: EventBus,
    policy: StatusPolicy,
}

impl OrderStatusStore {
    pub fn new(backend: SharedBackend, events: EventBus, policy: StatusPolicy) -> Self {
        OrderStatusStore {
            backend,
            events,
            policy,
        }
    }

    pub fn policy(&self) -> StatusPolicy {
        self.policy
    }

    /// All orders, most recently created first.
    pub async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        debug!("Listing orders");
        Ok(self.backend.select_orders(&OrderFilter::all()).await?)
    }

    pub async fn list_orders_by_status(&self, status: OrderStatus) -> StoreResult<Vec<Order>> {
        debug!(status = %status, "Listing orders by status");
        Ok(self
            .backend
            .select_orders(&OrderFilter::by_status(status))
            .await?)
    }

    pub async fn status_counts(&self) -> StoreResult<StatusCounts> {
        let orders = self.list_orders().await?;
        Ok(StatusCounts::tally(&orders))
    }

    /// `None` for unknown or malformed ids.
    pub async fn get_order_by_id(&self, id: &str) -> StoreResult<Option<Order>> {
        debug!(order_id = %id, "Fetching order");
        let orders = self.backend.select_orders(&OrderFilter::by_id(id)).await?;
        Ok(orders.into_iter().next())
    }

    pub async fn update_status(&self, id: &str, status: OrderStatus) -> StoreResult<Order> {
        let current = self
            .get_order_by_id(id)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, id))?;

        if let Err(e) = self.policy.check(current.status, status) {
            warn!(order_id = %id, from = %current.status, to = %status, "Rejected status change");
            return Err(e.into());
        }

        let updated_at = next_update_timestamp(current.updated_at, Utc::now());
        let order = self
            .backend
            .update_order_status(id, status, updated_at)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, id))?;

        info!(order_id = %id, from = %current.status, to = %status, "Order status updated");
        self.events.publish(StoreEvent::OrderStatusChanged {
            order_id: order.id.clone(),
            status,
        });
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::backend::StoreBackend;
    use crate::memory::MemoryBackend;
    use chrono::Duration;
    use harvest_core::{CustomerInfo, NewOrder, OrderLine, ValidationError};

    fn setup(policy: StatusPolicy) -> (OrderStatusStore, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::new());
        let store = OrderStatusStore::new(backend.clone(), EventBus::default(), policy);
        (store, backend)
    }

    async fn place(backend: &MemoryBackend, minutes_ago: i64) -> Order {
        backend
            .insert_order(&NewOrder {
                lines: vec![OrderLine {
                    item_id: "tomatoes".to_string(),
                    quantity: 1,
                    price_per_unit_cents: 249,
                }],
                customer: CustomerInfo {
                    name: "Grace".to_string(),
                    email: "grace@example.com".to_string(),
                    phone: "555-0199".to_string(),
                    address: "2 Vine Street".to_string(),
                },
                status: OrderStatus::Pending,
                total_cents: 249,
                created_at: Utc::now() - Duration::minutes(minutes_ago),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let (store, backend) = setup(StatusPolicy::default());
        let older = place(&backend, 10).await;
        let newer = place(&backend, 1).await;

        let ids: Vec<String> = store
            .list_orders()
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[tokio::test]
    async fn test_update_status_to_delivered() {
        let (store, backend) = setup(StatusPolicy::default());
        let order = place(&backend, 0).await;
        let mut rx = store.events.subscribe();

        store.update_status(&order.id, OrderStatus::Delivered).await.unwrap();

        let fetched = store.get_order_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, OrderStatus::Delivered);
        assert!(fetched.updated_at > fetched.created_at);
        assert_eq!(
            rx.recv().await.unwrap(),
            StoreEvent::OrderStatusChanged {
                order_id: order.id,
                status: OrderStatus::Delivered
            }
        );
    }

    #[tokio::test]
    async fn test_update_status_timestamp_strictly_increases() {
        let (store, backend) = setup(StatusPolicy::default());
        // created_at in the future: the wall clock alone would not advance.
        let order = place(&backend, -60).await;

        let first = store.update_status(&order.id, OrderStatus::InProgress).await.unwrap();
        let second = store.update_status(&order.id, OrderStatus::Pending).await.unwrap();
        assert!(first.updated_at > order.updated_at);
        assert!(second.updated_at > first.updated_at);
    }

    #[tokio::test]
    async fn test_update_status_unknown_id() {
        let (store, backend) = setup(StatusPolicy::default());
        let order = place(&backend, 0).await;

        let err = store
            .update_status("no-such-order", OrderStatus::Delivered)
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let orders = store.list_orders().await.unwrap();
        assert_eq!(orders, vec![order]);
    }

    #[tokio::test]
    async fn test_forward_only_policy() {
        let (store, backend) = setup(StatusPolicy::ForwardOnly);
        let order = place(&backend, 0).await;

        let err = store
            .update_status(&order.id, OrderStatus::Delivered)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::InvalidTransition { .. })
        ));

        store.update_status(&order.id, OrderStatus::InProgress).await.unwrap();
        store.update_status(&order.id, OrderStatus::Delivered).await.unwrap();
    }

    #[tokio::test]
    async fn test_filters_and_counts() {
        let (store, backend) = setup(StatusPolicy::default());
        let a = place(&backend, 3).await;
        place(&backend, 2).await;
        place(&backend, 1).await;
        store.update_status(&a.id, OrderStatus::InProgress).await.unwrap();

        let pending = store.list_orders_by_status(OrderStatus::Pending).await.unwrap();
        assert_eq!(pending.len(), 2);

        let counts = store.status_counts().await.unwrap();
        assert_eq!(
            counts,
            StatusCounts {
                pending: 2,
                in_progress: 1,
                delivered: 0
            }
        );
        assert!(store.get_order_by_id("%%bad id%%").await.unwrap().is_none());
    }
}
