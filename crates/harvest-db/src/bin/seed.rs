//! # Seed Sample Catalog
//!
//! Populates a storefront database with the sample produce catalog.
//!
//! ## Usage
//! ```bash
//! # Seed ./harvest.db
//! cargo run -p harvest-db --bin seed
//!
//! # Specify database path
//! cargo run -p harvest-db --bin seed -- --db ./data/harvest.db
//!
//! # Seed even if the catalog already has items
//! cargo run -p harvest-db --bin seed -- --force
//! ```

use std::env;

use harvest_db::{sample_catalog, Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./harvest.db");
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Harvest Storefront Seed");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./harvest.db)");
                println!("  -f, --force        Seed even if items already exist");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let db = Database::new(DbConfig::new(&db_path)).await?;
    info!(path = %db_path, "Connected, migrations applied");

    let existing = db.items().count().await?;
    if existing > 0 && !force {
        warn!(existing, "Catalog already has items, skipping (use --force)");
        return Ok(());
    }

    let mut inserted = 0;
    for fields in sample_catalog() {
        let item = db.items().insert(&fields).await?;
        info!(item_id = %item.id, name = %item.name, price = %item.price(), "Seeded item");
        inserted += 1;
    }

    info!(inserted, "Seed complete");
    db.close().await;
    Ok(())
}
