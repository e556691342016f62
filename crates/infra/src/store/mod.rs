//! Product store adapters.
//!
//! Both adapters implement [`catalog_products::ProductStore`] and enforce name
//! uniqueness on write.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;
