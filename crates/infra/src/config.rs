//! Configuration loading and representation.
//!
//! Values come from environment variables; every variable is optional and has
//! a default except `DATABASE_URL`, whose absence selects the in-memory store.

use std::net::SocketAddr;

use thiserror::Error;

use catalog_observability::LogFormat;
use catalog_products::STOCK_CEILING;

pub const BIND_ADDR_VAR: &str = "CATALOG_BIND_ADDR";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const DB_MAX_CONNECTIONS_VAR: &str = "CATALOG_DB_MAX_CONNECTIONS";
pub const STOCK_CEILING_VAR: &str = "CATALOG_STOCK_CEILING";
pub const LOG_FORMAT_VAR: &str = "CATALOG_LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(var: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            reason: reason.into(),
        }
    }
}

/// Storage backend selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    InMemory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreConfig,
    pub stock_ceiling: i32,
    pub log_format: LogFormat,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            store: StoreConfig::InMemory,
            stock_ceiling: STOCK_CEILING,
            log_format: LogFormat::default(),
        }
    }
}

impl CatalogConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get(BIND_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid(BIND_ADDR_VAR, e.to_string()))?;

        let store = match get(DATABASE_URL_VAR) {
            Some(database_url) => {
                let max_connections = match get(DB_MAX_CONNECTIONS_VAR) {
                    Some(raw) => raw
                        .trim()
                        .parse::<u32>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| {
                            ConfigError::invalid(DB_MAX_CONNECTIONS_VAR, "expected a positive integer")
                        })?,
                    None => DEFAULT_DB_MAX_CONNECTIONS,
                };
                StoreConfig::Postgres {
                    database_url,
                    max_connections,
                }
            }
            None => StoreConfig::InMemory,
        };

        let stock_ceiling = match get(STOCK_CEILING_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<i32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::invalid(STOCK_CEILING_VAR, "expected a positive integer"))?,
            None => STOCK_CEILING,
        };

        let log_format = match get(LOG_FORMAT_VAR) {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|e| ConfigError::invalid(LOG_FORMAT_VAR, e.to_string()))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            store,
            stock_ceiling,
            log_format,
        })
    }
}
