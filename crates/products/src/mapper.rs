//! Conversion between request/response shapes and the product record.

use crate::product::{Product, ProductRequest, ProductResponse};

/// Side-effect-free conversion used by the service.
pub trait ProductMapper: Send + Sync {
    /// Build an unsaved record from a creation request. The id is left unset.
    fn to_entity(&self, request: ProductRequest) -> Product;

    /// Build the read view of a persisted record.
    ///
    /// Returns `None` when the record has no id, i.e. it was never persisted.
    fn to_response(&self, product: Product) -> Option<ProductResponse>;
}

/// Field-by-field mapper.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultProductMapper;

impl ProductMapper for DefaultProductMapper {
    fn to_entity(&self, request: ProductRequest) -> Product {
        Product::unsaved(request.name, request.price, request.stock)
    }

    fn to_response(&self, product: Product) -> Option<ProductResponse> {
        let id = product.id?;
        Some(ProductResponse {
            id,
            name: product.name,
            price: product.price,
            stock: product.stock,
        })
    }
}
