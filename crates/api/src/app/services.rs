use catalog_core::ProductId;
use catalog_infra::{CatalogConfig, InMemoryProductStore, PostgresProductStore, StoreConfig};
use catalog_products::{
    ProductRequest, ProductResponse, ProductResult, ProductService, StoreError,
};

/// Product service bound to one of the available store backends.
pub enum AppServices {
    InMemory {
        products: ProductService<InMemoryProductStore>,
    },
    Persistent {
        products: ProductService<PostgresProductStore>,
    },
}

impl AppServices {
    pub fn in_memory(stock_ceiling: i32) -> Self {
        AppServices::InMemory {
            products: ProductService::with_default_mapper(InMemoryProductStore::new())
                .with_stock_ceiling(stock_ceiling),
        }
    }

    /// Connect to Postgres and make sure the schema exists.
    pub async fn persistent(
        database_url: &str,
        max_connections: u32,
        stock_ceiling: i32,
    ) -> Result<Self, StoreError> {
        let store = PostgresProductStore::connect(database_url, max_connections).await?;
        store.ensure_schema().await?;
        Ok(AppServices::Persistent {
            products: ProductService::with_default_mapper(store).with_stock_ceiling(stock_ceiling),
        })
    }

    pub async fn from_config(config: &CatalogConfig) -> Result<Self, StoreError> {
        match &config.store {
            StoreConfig::InMemory => {
                tracing::warn!("DATABASE_URL not set; products are kept in memory only");
                Ok(Self::in_memory(config.stock_ceiling))
            }
            StoreConfig::Postgres {
                database_url,
                max_connections,
            } => Self::persistent(database_url, *max_connections, config.stock_ceiling).await,
        }
    }

    pub fn backend(&self) -> &'static str {
        match self {
            AppServices::InMemory { .. } => "in_memory",
            AppServices::Persistent { .. } => "postgres",
        }
    }

    pub async fn products_find(&self, id: ProductId) -> ProductResult<ProductResponse> {
        match self {
            AppServices::InMemory { products } => products.find_by_id(id).await,
            AppServices::Persistent { products } => products.find_by_id(id).await,
        }
    }

    pub async fn products_save(&self, request: ProductRequest) -> ProductResult<ProductResponse> {
        match self {
            AppServices::InMemory { products } => products.save(request).await,
            AppServices::Persistent { products } => products.save(request).await,
        }
    }
}
