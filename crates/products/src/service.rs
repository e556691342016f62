//! Product service: validation in front of the store.

use catalog_core::ProductId;

use crate::error::{ProductError, ProductResult, StoreError};
use crate::mapper::{DefaultProductMapper, ProductMapper};
use crate::product::{Product, ProductRequest, ProductResponse};
use crate::store::ProductStore;

/// Exclusive upper bound on stock for newly created products.
pub const STOCK_CEILING: i32 = 10;

/// Stateless service mediating between request/response shapes and the store.
///
/// Every call starts from scratch; nothing is cached between invocations. The
/// store and mapper are supplied by the caller.
///
/// `save` runs `Received -> StockChecked -> NameChecked -> Persisted ->
/// Returned`, exiting early with a rejection at either check.
#[derive(Debug, Clone)]
pub struct ProductService<S, M = DefaultProductMapper> {
    store: S,
    mapper: M,
    stock_ceiling: i32,
}

impl<S> ProductService<S, DefaultProductMapper>
where
    S: ProductStore,
{
    /// Service with the field-by-field mapper.
    pub fn with_default_mapper(store: S) -> Self {
        Self::new(store, DefaultProductMapper)
    }
}

impl<S, M> ProductService<S, M>
where
    S: ProductStore,
    M: ProductMapper,
{
    pub fn new(store: S, mapper: M) -> Self {
        Self {
            store,
            mapper,
            stock_ceiling: STOCK_CEILING,
        }
    }

    /// Override the exclusive stock ceiling (defaults to [`STOCK_CEILING`]).
    pub fn with_stock_ceiling(mut self, stock_ceiling: i32) -> Self {
        self.stock_ceiling = stock_ceiling;
        self
    }

    pub fn stock_ceiling(&self) -> i32 {
        self.stock_ceiling
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Look up a product by id.
    pub async fn find_by_id(&self, id: ProductId) -> ProductResult<ProductResponse> {
        let product = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;
        self.respond(product)
    }

    /// Validate and persist a new product.
    ///
    /// Performs exactly one name lookup and, when both checks pass, exactly one
    /// store save. A duplicate detected by the store itself (a concurrent
    /// insert that slipped past the lookup) is reported as `AlreadyExists`.
    pub async fn save(&self, request: ProductRequest) -> ProductResult<ProductResponse> {
        self.check_stock(request.stock)?;

        if self.store.find_by_name(&request.name).await?.is_some() {
            return Err(ProductError::AlreadyExists(request.name));
        }

        let name = request.name.clone();
        let saved = self
            .store
            .save(self.mapper.to_entity(request))
            .await
            .map_err(|e| match e {
                StoreError::DuplicateName(_) => ProductError::AlreadyExists(name),
                other => ProductError::Store(other),
            })?;

        self.respond(saved)
    }

    fn check_stock(&self, stock: i32) -> ProductResult<()> {
        if (0..self.stock_ceiling).contains(&stock) {
            Ok(())
        } else {
            Err(ProductError::StockOutOfRange {
                stock,
                ceiling: self.stock_ceiling,
            })
        }
    }

    fn respond(&self, product: Product) -> ProductResult<ProductResponse> {
        self.mapper
            .to_response(product)
            .ok_or(ProductError::Store(StoreError::MissingId))
    }
}
