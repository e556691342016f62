//! Products domain module.
//!
//! This crate contains the catalog's business rules: the product record, the
//! request/response shapes, the mapper between them, the store contract and
//! the service that validates creation requests. It performs no IO itself;
//! storage is reached only through [`ProductStore`].

pub mod error;
pub mod mapper;
pub mod product;
pub mod service;
pub mod store;

pub use error::{ProductError, ProductResult, StoreError};
pub use mapper::{DefaultProductMapper, ProductMapper};
pub use product::{Product, ProductRequest, ProductResponse};
pub use service::{ProductService, STOCK_CEILING};
pub use store::ProductStore;
