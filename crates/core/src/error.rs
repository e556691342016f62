//! Domain error model.

use thiserror::Error;

/// Result type used for boundary-level checks.
pub type DomainResult<T> = Result<T, DomainError>;

/// Boundary-level error.
///
/// Covers malformed input that never reaches the product service (blank
/// names, negative prices, unparsable identifiers). Business rejections live in
/// `catalog_products::ProductError`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
