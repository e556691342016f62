//! `catalog-core`: shared catalog primitives.
//!
//! Identifiers and boundary-level validation errors. No IO, no storage.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::ProductId;
