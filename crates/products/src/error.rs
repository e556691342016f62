//! Product error taxonomy.

use thiserror::Error;

use catalog_core::ProductId;

/// Result type returned by the product service.
pub type ProductResult<T> = Result<T, ProductError>;

/// Rejections raised by the product service.
///
/// `NotFound`, `AlreadyExists` and `StockOutOfRange` are rejected requests,
/// never retryable. `Store` carries collaborator failures as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// No product with the requested id exists.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// A product with the requested name already exists.
    #[error("a product named '{0}' already exists")]
    AlreadyExists(String),

    /// The requested stock is outside `[0, ceiling)`.
    #[error("stock {stock} is out of range, expected 0 <= stock < {ceiling}")]
    StockOutOfRange { stock: i32, ceiling: i32 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ProductError {
    /// Stable machine-readable code, used by the HTTP boundary.
    pub fn code(&self) -> &'static str {
        match self {
            ProductError::NotFound(_) => "not_found",
            ProductError::AlreadyExists(_) => "product_already_exists",
            ProductError::StockOutOfRange { .. } => "stock_out_of_range",
            ProductError::Store(StoreError::Unavailable(_)) => "store_unavailable",
            ProductError::Store(_) => "store_error",
        }
    }

    /// Whether this is a rejected request (as opposed to a system fault).
    pub fn is_rejection(&self) -> bool {
        !matches!(self, ProductError::Store(_))
    }
}

/// Failure reported by a [`crate::ProductStore`] implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store refused a write because the name is already taken.
    #[error("duplicate product name: {0}")]
    DuplicateName(String),

    /// The store could not be reached (pool closed, connection lost, ...).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure.
    #[error("store error: {0}")]
    Backend(String),

    /// The store returned a record without an id after saving it.
    #[error("store returned a product without an id")]
    MissingId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ProductError::NotFound(ProductId::new(1)).code(), "not_found");
        assert_eq!(
            ProductError::AlreadyExists("agua".into()).code(),
            "product_already_exists"
        );
        assert_eq!(
            ProductError::StockOutOfRange { stock: 11, ceiling: 10 }.code(),
            "stock_out_of_range"
        );
        assert_eq!(
            ProductError::from(StoreError::Unavailable("down".into())).code(),
            "store_unavailable"
        );
        assert_eq!(ProductError::from(StoreError::MissingId).code(), "store_error");
    }

    #[test]
    fn store_failures_are_not_rejections() {
        assert!(ProductError::NotFound(ProductId::new(1)).is_rejection());
        assert!(!ProductError::from(StoreError::Backend("boom".into())).is_rejection());
    }

    #[test]
    fn store_errors_display_transparently() {
        let err = ProductError::from(StoreError::Backend("boom".into()));
        assert_eq!(err.to_string(), "store error: boom");
    }
}
