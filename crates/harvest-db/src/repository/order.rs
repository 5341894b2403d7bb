//! # Order Repository
//!
//! Database operations for orders and their lines.
//!
//! ## Order Insert Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    insert(new_order)                                    │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │    INSERT INTO orders       (header + customer block)                  │
//! │    INSERT INTO order_lines  position 0                                 │
//! │    INSERT INTO order_lines  position 1                                 │
//! │    ...                                                                  │
//! │  COMMIT        ← any failure before this rolls everything back         │
//! │                                                                         │
//! │  A reader sees the order with all of its lines, or not at all.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use harvest_core::{CustomerInfo, NewOrder, Order, OrderLine, OrderStatus};
use harvest_store::OrderFilter;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::{encode_timestamp, stored_timestamp};
use crate::error::DbResult;

#[derive(Debug, FromRow)]
struct OrderRow {
    id: String,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    customer_address: String,
    status: OrderStatus,
    total_cents: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, lines: Vec<OrderLine>) -> Order {
        Order {
            id: self.id,
            lines,
            customer: CustomerInfo {
                name: self.customer_name,
                email: self.customer_email,
                phone: self.customer_phone,
                address: self.customer_address,
            },
            status: self.status,
            total_cents: self.total_cents,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct OrderLineRow {
    order_id: String,
    item_id: String,
    quantity: i64,
    price_per_unit_cents: i64,
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Orders matching `filter` with their lines, newest first.
    ///
    /// Two queries: the headers, then every line of those headers in one
    /// pass, grouped by order id.
    pub async fn list(&self, filter: &OrderFilter) -> DbResult<Vec<Order>> {
        debug!(?filter, "Selecting orders");

        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, customer_name, customer_email, customer_phone,
                   customer_address, status, total_cents, created_at, updated_at
            FROM orders
            WHERE (?1 IS NULL OR id = ?1)
              AND (?2 IS NULL OR status = ?2)
            ORDER BY created_at DESC, rowid ASC
            "#,
        )
        .bind(filter.id.as_deref())
        .bind(filter.status)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let line_rows = sqlx::query_as::<_, OrderLineRow>(
            r#"
            SELECT l.order_id, l.item_id, l.quantity, l.price_per_unit_cents
            FROM order_lines l
            INNER JOIN orders o ON o.id = l.order_id
            WHERE (?1 IS NULL OR o.id = ?1)
              AND (?2 IS NULL OR o.status = ?2)
            ORDER BY l.order_id, l.position
            "#,
        )
        .bind(filter.id.as_deref())
        .bind(filter.status)
        .fetch_all(&self.pool)
        .await?;

        let mut lines_by_order: HashMap<String, Vec<OrderLine>> = HashMap::new();
        for row in line_rows {
            lines_by_order.entry(row.order_id).or_default().push(OrderLine {
                item_id: row.item_id,
                quantity: row.quantity,
                price_per_unit_cents: row.price_per_unit_cents,
            });
        }

        let orders: Vec<Order> = rows
            .into_iter()
            .map(|row| {
                let lines = lines_by_order.remove(&row.id).unwrap_or_default();
                row.into_order(lines)
            })
            .collect();

        debug!(count = orders.len(), "Selected orders");
        Ok(orders)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let mut orders = self.list(&OrderFilter::by_id(id)).await?;
        Ok(orders.pop())
    }

    /// Inserts the header and every line in one transaction.
    pub async fn insert(&self, new_order: &NewOrder) -> DbResult<Order> {
        let id = Uuid::new_v4().to_string();
        let created_at = stored_timestamp(new_order.created_at);
        let created_text = encode_timestamp(&created_at);

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, customer_name, customer_email, customer_phone,
                customer_address, status, total_cents, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
            "#,
        )
        .bind(&id)
        .bind(&new_order.customer.name)
        .bind(&new_order.customer.email)
        .bind(&new_order.customer.phone)
        .bind(&new_order.customer.address)
        .bind(new_order.status)
        .bind(new_order.total_cents)
        .bind(&created_text)
        .execute(&mut *tx)
        .await?;

        for (position, line) in new_order.lines.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_lines (
                    order_id, position, item_id, quantity, price_per_unit_cents
                ) VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&id)
            .bind(position as i64)
            .bind(&line.item_id)
            .bind(line.quantity)
            .bind(line.price_per_unit_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(order_id = %id, lines = new_order.lines.len(), "Inserted order");

        let mut order = new_order.clone().into_order(id);
        order.created_at = created_at;
        order.updated_at = created_at;
        Ok(order)
    }

    /// Sets status and `updated_at`. `None` when `id` is unknown.
    pub async fn update_status(
        &self,
        id: &str,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> DbResult<Option<Order>> {
        let updated_at = stored_timestamp(updated_at);

        let result = sqlx::query("UPDATE orders SET status = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .bind(encode_timestamp(&updated_at))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        debug!(order_id = %id, status = %status, "Updated order status");
        self.get_by_id(id).await
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
