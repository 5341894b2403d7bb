//! # Harvest Storefront
//!
//! JSON HTTP front door over the harvest-store services.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Server                                │
//! │                                                                         │
//! │  Browser ───► axum Router ───► Storefront services ───► StoreBackend   │
//! │                   │                    │                  (SQLite)      │
//! │                   ▼                    ▼                                │
//! │             session Cart          EventBus ───► event logger           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use harvest_db::sample_catalog;
use harvest_store::{StoreEvent, StoreResult, Storefront};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use config::{ConfigError, StorefrontConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::AppState;

/// Builds the full router with request tracing.
pub fn build_router(state: AppState) -> Router {
    routes::routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Adds the sample catalog when the store has no items. Returns how many
/// items were added.
pub async fn seed_catalog_if_empty(store: &Storefront) -> StoreResult<usize> {
    if !store.catalog().list_items().await?.is_empty() {
        return Ok(0);
    }

    let mut added = 0;
    for fields in sample_catalog() {
        store.catalog().add_item(fields).await?;
        added += 1;
    }
    info!(added, "Seeded sample catalog");
    Ok(added)
}

/// Logs every store event until the bus closes.
pub fn spawn_event_logger(store: &Storefront) -> JoinHandle<()> {
    let mut rx = store.events().subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(StoreEvent::OrderPlaced {
                    order_id,
                    total_cents,
                }) => info!(order_id = %order_id, total_cents, "Order placed"),
                Ok(StoreEvent::OrderStatusChanged { order_id, status }) => {
                    info!(order_id = %order_id, status = %status, "Order status changed")
                }
                Ok(event) => info!(?event, "Catalog changed"),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Event logger lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    })
}
