use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use catalog_core::ProductId;

/// Persisted product record.
///
/// `id` is `None` until the store has saved the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<ProductId>,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
}

impl Product {
    /// A record that has not been persisted yet.
    pub fn unsaved(name: impl Into<String>, price: Decimal, stock: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            stock,
        }
    }

    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Creation input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
}

impl ProductRequest {
    pub fn new(name: impl Into<String>, price: Decimal, stock: i32) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
        }
    }
}

/// Read view of a persisted product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
}
