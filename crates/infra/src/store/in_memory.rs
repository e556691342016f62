use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tracing::instrument;

use catalog_core::ProductId;
use catalog_products::{Product, ProductStore, StoreError};

/// In-memory product store for tests/dev.
///
/// Ids are handed out from a counter starting at 1. Explicit ids passed to
/// `save` advance the counter so generated ids never collide with them.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    products: BTreeMap<ProductId, Product>,
    names: HashMap<String, ProductId>,
    last_id: i64,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored products. Counts through a poisoned lock.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .products
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    #[instrument(skip(self), level = "debug")]
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner.products.get(&id).cloned())
    }

    #[instrument(skip(self), level = "debug")]
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, StoreError> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner
            .names
            .get(name)
            .and_then(|id| inner.products.get(id))
            .cloned())
    }

    #[instrument(skip(self, product), level = "debug", fields(name = %product.name))]
    async fn save(&self, product: Product) -> Result<Product, StoreError> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;

        if let Some(holder) = inner.names.get(&product.name) {
            if Some(*holder) != product.id {
                return Err(StoreError::DuplicateName(product.name));
            }
        }

        let id = match product.id {
            Some(id) => {
                // Upsert: drop the previous name index entry when renaming.
                if let Some(previous) = inner.products.get(&id) {
                    let previous_name = previous.name.clone();
                    inner.names.remove(&previous_name);
                }
                inner.last_id = inner.last_id.max(id.get());
                id
            }
            None => {
                inner.last_id += 1;
                ProductId::new(inner.last_id)
            }
        };

        let saved = product.with_id(id);
        inner.names.insert(saved.name.clone(), id);
        inner.products.insert(id, saved.clone());
        tracing::debug!(%id, "product stored");
        Ok(saved)
    }
}
