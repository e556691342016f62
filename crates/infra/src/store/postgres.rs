//! Postgres-backed product store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (unique violation on `products_name_key`) | `23505` | `DuplicateName` |
//! | Database (other) | any | `Backend` |
//! | PoolClosed / PoolTimedOut / Io | N/A | `Unavailable` |
//! | Other | N/A | `Backend` |
//!
//! ## Thread Safety
//!
//! `PostgresProductStore` is `Send + Sync`; the SQLx pool handles connection
//! sharing. Name uniqueness is a table constraint, so racing inserts of the
//! same name resolve to exactly one winner.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;

use catalog_core::ProductId;
use catalog_products::{Product, ProductStore, StoreError};

/// Schema applied by [`PostgresProductStore::ensure_schema`].
pub const SCHEMA: &str = include_str!("../../migrations/0001_create_products.sql");

const NAME_CONSTRAINT: &str = "products_name_key";

/// Moves the id sequence past an explicitly written id so later generated
/// ids cannot land on it. Never moves the sequence backwards.
const RESYNC_ID_SEQUENCE: &str = r#"
    SELECT setval(
        pg_get_serial_sequence('products', 'id'),
        GREATEST($1, (SELECT last_value FROM products_id_seq))
    )
"#;

#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e, ""))?;
        Ok(Self::new(pool))
    }

    /// Create the `products` table if it does not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e, ""))?;
        Ok(())
    }

    async fn insert(&self, product: &Product) -> Result<Product, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO products (name, price, stock)
            VALUES ($1, $2, $3)
            RETURNING id, name, price, stock
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.stock)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_product", e, &product.name))?;

        decode(&row)
    }

    async fn upsert(&self, id: ProductId, product: &Product) -> Result<Product, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_upsert", e, ""))?;

        let row = sqlx::query(
            r#"
            INSERT INTO products (id, name, price, stock)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id)
            DO UPDATE SET
                name = EXCLUDED.name,
                price = EXCLUDED.price,
                stock = EXCLUDED.stock
            RETURNING id, name, price, stock
            "#,
        )
        .bind(id.get())
        .bind(&product.name)
        .bind(product.price)
        .bind(product.stock)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("upsert_product", e, &product.name))?;

        sqlx::query(RESYNC_ID_SEQUENCE)
            .bind(id.get())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("resync_id_sequence", e, ""))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_upsert", e, ""))?;

        decode(&row)
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip(self), err)]
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, price, stock
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_product_by_id", e, ""))?;

        row.as_ref().map(decode).transpose()
    }

    #[instrument(skip(self), err)]
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, price, stock
            FROM products
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_product_by_name", e, name))?;

        row.as_ref().map(decode).transpose()
    }

    #[instrument(skip(self, product), fields(name = %product.name), err)]
    async fn save(&self, product: Product) -> Result<Product, StoreError> {
        match product.id {
            Some(id) => self.upsert(id, &product).await,
            None => self.insert(&product).await,
        }
    }
}

#[derive(Debug)]
struct ProductRow {
    id: i64,
    name: String,
    price: Decimal,
    stock: i32,
}

impl<'r> FromRow<'r, PgRow> for ProductRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(ProductRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            stock: row.try_get("stock")?,
        })
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product::unsaved(row.name, row.price, row.stock).with_id(ProductId::new(row.id))
    }
}

fn decode(row: &PgRow) -> Result<Product, StoreError> {
    ProductRow::from_row(row)
        .map(Product::from)
        .map_err(|e| StoreError::Backend(format!("failed to decode product row: {e}")))
}

/// Translate an SQLx error into a [`StoreError`].
///
/// `name` is the product name involved in the write, reported back on a
/// uniqueness violation.
fn map_sqlx_error(operation: &str, err: sqlx::Error, name: &str) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let is_name_conflict = db_err.code().as_deref() == Some("23505")
                && db_err.constraint().is_none_or(|c| c == NAME_CONSTRAINT);
            if is_name_conflict {
                StoreError::DuplicateName(name.to_string())
            } else {
                StoreError::Backend(format!(
                    "database error in {}: {}",
                    operation,
                    db_err.message()
                ))
            }
        }
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {}", operation))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("connection pool timed out in {}", operation))
        }
        sqlx::Error::Io(e) => StoreError::Unavailable(format!("io error in {}: {}", operation, e)),
        _ => StoreError::Backend(format!("sqlx error in {}: {}", operation, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_failures_are_unavailable() {
        assert!(matches!(
            map_sqlx_error("find_product_by_id", sqlx::Error::PoolClosed, ""),
            StoreError::Unavailable(msg) if msg.contains("find_product_by_id")
        ));
        assert!(matches!(
            map_sqlx_error("insert_product", sqlx::Error::PoolTimedOut, "agua"),
            StoreError::Unavailable(_)
        ));
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(
            map_sqlx_error("connect", sqlx::Error::Io(io), ""),
            StoreError::Unavailable(msg) if msg.contains("refused")
        ));
    }

    #[test]
    fn other_failures_are_backend_errors() {
        assert!(matches!(
            map_sqlx_error("insert_product", sqlx::Error::RowNotFound, "agua"),
            StoreError::Backend(msg) if msg.contains("insert_product")
        ));
    }

    #[test]
    fn id_sequence_resync_targets_the_bigserial_sequence() {
        assert!(SCHEMA.contains("id BIGSERIAL"));
        assert!(RESYNC_ID_SEQUENCE.contains("pg_get_serial_sequence('products', 'id')"));
        assert!(RESYNC_ID_SEQUENCE.contains("GREATEST($1"));
    }

    #[test]
    fn schema_declares_the_name_constraint() {
        assert!(SCHEMA.contains("CREATE TABLE IF NOT EXISTS products"));
        assert!(SCHEMA.contains(NAME_CONSTRAINT));
        assert!(SCHEMA.contains("price >= 0"));
    }
}
