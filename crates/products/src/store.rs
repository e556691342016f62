//! Store contract for product records.

use std::sync::Arc;

use async_trait::async_trait;

use catalog_core::ProductId;

use crate::error::StoreError;
use crate::product::Product;

/// Persistence collaborator holding the authoritative product records.
///
/// Implementations must make concurrent calls safe on their own; the service
/// performs no locking.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Exact, case-sensitive name match.
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, StoreError>;

    /// Insert (when `product.id` is `None`) or upsert the record.
    ///
    /// Returns the stored record with its id populated. Implementations should
    /// reject a name already held by another record with
    /// [`StoreError::DuplicateName`].
    async fn save(&self, product: Product) -> Result<Product, StoreError>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, StoreError> {
        (**self).find_by_name(name).await
    }

    async fn save(&self, product: Product) -> Result<Product, StoreError> {
        (**self).save(product).await
    }
}
