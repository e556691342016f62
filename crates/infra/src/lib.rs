//! Infrastructure layer: product stores and configuration.

pub mod config;
pub mod store;


pub use config::{CatalogConfig, ConfigError, StoreConfig};
pub use store::{InMemoryProductStore, PostgresProductStore};
