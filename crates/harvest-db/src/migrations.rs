//! # Schema Migrations
//!
//! The storefront schema ships inside the binary; `Database::new` brings an
//! existing file up to date before any repository runs.
//!
//! ```text
//! migrations/sqlite/
//!   001_initial_schema.sql   items, orders, order_lines
//!
//!   items ◄┄┄┄ order_lines.item_id     (snapshot, no FK: items may be deleted)
//!   orders ◄── order_lines.order_id    (FK, ON DELETE CASCADE)
//! ```
//!
//! Applied versions are recorded by sqlx in `_sqlx_migrations`. Files are
//! append-only: a change to the schema is a new `NNN_description.sql`.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// How far a database is behind the embedded schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationStatus {
    pub embedded: usize,
    pub applied: usize,
}

impl MigrationStatus {
    pub fn is_current(&self) -> bool {
        self.applied >= self.embedded
    }

    pub fn pending(&self) -> usize {
        self.embedded.saturating_sub(self.applied)
    }
}

/// Applies every embedded migration not yet recorded. Safe to call on
/// every start.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    let before = migration_status(pool).await?;
    if before.is_current() {
        debug!(applied = before.applied, "Schema is current");
        return Ok(());
    }

    MIGRATOR.run(pool).await?;
    info!(applied = before.pending(), "Applied storefront migrations");
    Ok(())
}

/// Counts embedded and successfully applied migrations. A database that
/// was never migrated reports zero applied.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<MigrationStatus> {
    let tracked: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_one(pool)
    .await?;

    let applied: i64 = if tracked == 0 {
        0
    } else {
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?
    };

    Ok(MigrationStatus {
        embedded: MIGRATOR.migrations.len(),
        applied: applied as usize,
    })
}
