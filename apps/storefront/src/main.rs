//! # Harvest Storefront Server
//!
//! ```text
//! env config ─► tracing ─► SQLite (migrations) ─► seed ─► axum::serve
//! ```

use std::sync::Arc;

use harvest_db::Database;
use harvest_storefront::{
    build_router, seed_catalog_if_empty, spawn_event_logger, AppState, StorefrontConfig,
};
use harvest_store::Storefront;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Defaults to debug for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,harvest=debug,sqlx=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();

    info!("Starting Harvest storefront...");

    let config = StorefrontConfig::load()?;
    info!(
        addr = %config.bind_addr,
        db = %config.db_path.display(),
        policy = ?config.status_policy,
        "Configuration loaded"
    );

    let db = Arc::new(Database::new(config.db_config()).await?);
    let store = Storefront::new(db.clone(), config.status_policy);

    if config.seed_catalog {
        seed_catalog_if_empty(&store).await?;
    }

    let _events = spawn_event_logger(&store);
    let app = build_router(AppState::new(store));

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Storefront listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
