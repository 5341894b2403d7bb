//! # Item Repository
//!
//! Database operations for catalog items.

use chrono::Utc;
use harvest_core::{Item, ItemFields};
use harvest_store::ItemFilter;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use super::{encode_timestamp, stored_timestamp};
use crate::error::DbResult;

/// Repository for item database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ItemRepository::new(pool);
/// let item = repo.insert(&fields).await?;
/// let all = repo.list(&ItemFilter::all()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Items matching `filter`, newest first; ties in insertion order.
    pub async fn list(&self, filter: &ItemFilter) -> DbResult<Vec<Item>> {
        debug!(?filter, "Selecting items");

        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, category, price_cents, unit, description, image,
                   created_at, updated_at
            FROM items
            WHERE (?1 IS NULL OR id = ?1)
              AND (?2 IS NULL OR category = ?2)
            ORDER BY created_at DESC, rowid ASC
            "#,
        )
        .bind(filter.id.as_deref())
        .bind(filter.category)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = items.len(), "Selected items");
        Ok(items)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Item>> {
        let mut items = self.list(&ItemFilter::by_id(id)).await?;
        Ok(items.pop())
    }

    /// Inserts a new item with a generated UUID.
    pub async fn insert(&self, fields: &ItemFields) -> DbResult<Item> {
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

        sqlx::query(
            r#"
            INSERT INTO items (
                id, name, category, price_cents, unit, description, image,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.category)
        .bind(item.price_cents)
        .bind(&item.unit)
        .bind(&item.description)
        .bind(&item.image)
        .bind(encode_timestamp(&item.created_at))
        .bind(encode_timestamp(&item.updated_at))
        .execute(&self.pool)
        .await?;

        debug!(item_id = %item.id, "Inserted item");
        Ok(item)
    }

    /// Overwrites the writable fields. `None` when `id` is unknown.
    pub async fn update(&self, id: &str, fields: &ItemFields) -> DbResult<Option<Item>> {
        let now = stored_timestamp(Utc::now());

        let result = sqlx::query(
            r#"
            UPDATE items
            SET name = ?2, category = ?3, price_cents = ?4, unit = ?5,
                description = ?6, image = ?7, updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&fields.name)
        .bind(fields.category)
        .bind(fields.price_cents)
        .bind(&fields.unit)
        .bind(&fields.description)
        .bind(&fields.image)
        .bind(encode_timestamp(&now))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        debug!(item_id = %id, "Updated item");
        self.get_by_id(id).await
    }

    /// Deletes an item. Order lines referencing it are kept.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
