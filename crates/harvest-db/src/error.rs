//! # SQLite Errors
//!
//! ```text
//! sqlx::Error ──► DbError ──► BackendError ──► StoreError::Persistence
//!                 (sorted)    (source kept)    (500 at the HTTP layer)
//! ```
//!
//! Constraint failures are sorted by reading SQLite's message text, which
//! names the constraint kind and, for UNIQUE, the `table.column`.

use harvest_store::BackendError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// A UNIQUE or PRIMARY KEY constraint fired. `column` is `table.column`.
    #[error("Duplicate value for {column}")]
    Duplicate { column: String },

    /// A CHECK, NOT NULL or FOREIGN KEY constraint fired. Validation in
    /// harvest-store normally stops these first.
    #[error("Constraint violation: {detail}")]
    Constraint { detail: String },

    /// The file could not be opened, the pool is closed, or no connection
    /// became free in time.
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    /// A stored value does not decode into its domain type.
    #[error("Unreadable row: {0}")]
    Decode(String),

    #[error("Query failed: {0}")]
    Query(String),
}

impl DbError {
    pub(crate) fn unavailable(reason: impl std::fmt::Display) -> Self {
        DbError::Unavailable(reason.to_string())
    }
}

fn classify_database_message(message: &str) -> DbError {
    if let Some(column) = message.strip_prefix("UNIQUE constraint failed: ") {
        return DbError::Duplicate {
            column: column.to_string(),
        };
    }

    let is_constraint = ["CHECK", "NOT NULL", "FOREIGN KEY"]
        .iter()
        .any(|kind| message.contains(&format!("{kind} constraint failed")));
    if is_constraint {
        DbError::Constraint {
            detail: message.to_string(),
        }
    } else {
        DbError::Query(message.to_string())
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => classify_database_message(db_err.message()),
            sqlx::Error::ColumnDecode { index, source } => {
                DbError::Decode(format!("column {index}: {source}"))
            }
            sqlx::Error::Decode(source) => DbError::Decode(source.to_string()),
            sqlx::Error::PoolTimedOut => DbError::unavailable("timed out waiting for a connection"),
            sqlx::Error::PoolClosed => DbError::unavailable("pool is closed"),
            sqlx::Error::Io(e) => DbError::unavailable(e),
            other => DbError::Query(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::Migration(err.to_string())
    }
}

impl From<DbError> for BackendError {
    fn from(err: DbError) -> Self {
        BackendError::with_source("sqlite backend error", err)
    }
}

pub type DbResult<T> = Result<T, DbError>;
