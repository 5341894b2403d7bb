//! Storefront configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                    | Default          |
//! |-----------------------------|------------------|
//! | `HARVEST_BIND_ADDR`         | `0.0.0.0:8080`   |
//! | `HARVEST_DB_PATH`           | `./harvest.db`   |
//! | `HARVEST_DB_MAX_CONNECTIONS`| `5`              |
//! | `HARVEST_SEED_CATALOG`      | `true`           |
//! | `HARVEST_STATUS_POLICY`     | `unrestricted`   |

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use harvest_core::StatusPolicy;
use harvest_db::DbConfig;

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// HTTP listen address
    pub bind_addr: SocketAddr,

    /// SQLite database file
    pub db_path: PathBuf,

    /// Pool size
    pub db_max_connections: u32,

    /// Insert the sample catalog when the database has no items
    pub seed_catalog: bool,

    /// Which order status changes are accepted
    pub status_policy: StatusPolicy,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let invalid = |key: &str, value: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        let bind_addr = get("HARVEST_BIND_ADDR", "0.0.0.0:8080");
        let db_max_connections = get("HARVEST_DB_MAX_CONNECTIONS", "5");
        let seed_catalog = get("HARVEST_SEED_CATALOG", "true");
        let status_policy = get("HARVEST_STATUS_POLICY", "unrestricted");

        let config = StorefrontConfig {
            bind_addr: bind_addr
                .parse()
                .map_err(|_| invalid("HARVEST_BIND_ADDR", &bind_addr))?,

            db_path: PathBuf::from(get("HARVEST_DB_PATH", "./harvest.db")),

            db_max_connections: db_max_connections
                .parse()
                .map_err(|_| invalid("HARVEST_DB_MAX_CONNECTIONS", &db_max_connections))?,

            seed_catalog: parse_bool(&seed_catalog)
                .ok_or_else(|| invalid("HARVEST_SEED_CATALOG", &seed_catalog))?,

            status_policy: status_policy
                .parse()
                .map_err(|_| invalid("HARVEST_STATUS_POLICY", &status_policy))?,
        };

        if config.db_max_connections == 0 {
            return Err(invalid("HARVEST_DB_MAX_CONNECTIONS", "0"));
        }

        Ok(config)
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.db_path).max_connections(self.db_max_connections)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.db_path, PathBuf::from("./harvest.db"));
        assert_eq!(config.db_max_connections, 5);
        assert!(config.seed_catalog);
        assert_eq!(config.status_policy, StatusPolicy::Unrestricted);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("HARVEST_BIND_ADDR", "127.0.0.1:3000"),
            ("HARVEST_DB_PATH", "/var/lib/harvest/shop.db"),
            ("HARVEST_DB_MAX_CONNECTIONS", "8"),
            ("HARVEST_SEED_CATALOG", "no"),
            ("HARVEST_STATUS_POLICY", "forward-only"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.db_config().max_connections, 8);
        assert!(!config.seed_catalog);
        assert_eq!(config.status_policy, StatusPolicy::ForwardOnly);
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("HARVEST_BIND_ADDR", "not-an-address"),
            ("HARVEST_DB_MAX_CONNECTIONS", "many"),
            ("HARVEST_DB_MAX_CONNECTIONS", "0"),
            ("HARVEST_SEED_CATALOG", "maybe"),
            ("HARVEST_STATUS_POLICY", "backwards"),
        ] {
            let err = load(&[(key, value)]).unwrap_err();
            assert!(err.to_string().contains(key), "{key}={value}: {err}");
        }
    }
}
