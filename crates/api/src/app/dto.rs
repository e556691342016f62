use rust_decimal::Decimal;
use serde::Deserialize;

use catalog_core::{DomainError, DomainResult};
use catalog_products::ProductRequest;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
}

impl CreateProductRequest {
    /// Boundary checks that the service does not repeat: a usable name and a
    /// non-negative price. Stock is left to the service.
    pub fn into_request(self) -> DomainResult<ProductRequest> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.price < Decimal::ZERO {
            return Err(DomainError::validation("price cannot be negative"));
        }
        Ok(ProductRequest::new(self.name, self.price, self.stock))
    }
}
