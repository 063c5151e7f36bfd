//! # Product Repository
//!
//! Database operations for products.
//!
//! Listing is always ordered by name ascending - the only ordering the
//! application ever asks for.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use grocer_core::{NewProduct, Product, ProductPatch};

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products, ordered by name ascending.
    pub async fn list(&self) -> StoreResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category, price_cents, stock, created_at, updated_at
            FROM products
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets a product by ID.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category, price_cents, stock, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product with a generated ID and returns it.
    pub async fn insert(&self, new: NewProduct) -> StoreResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            category: new.category,
            price_cents: new.price_cents,
            stock: new.stock,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %product.id, name = %product.name, "inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, category, price_cents, stock, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    /// Merges the given fields into an existing product. Unset fields are
    /// left untouched.
    ///
    /// Returns NotFound when the ID is absent.
    pub async fn update(&self, id: &str, patch: ProductPatch) -> StoreResult<()> {
        debug!(id = %id, "updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name        = COALESCE(?2, name),
                category    = COALESCE(?3, category),
                price_cents = COALESCE(?4, price_cents),
                stock       = COALESCE(?5, stock),
                updated_at  = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.category)
        .bind(patch.price_cents)
        .bind(patch.stock)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Product", id));
        }

        Ok(())
    }

    /// Deletes a product. Idempotent: deleting a missing ID is Ok.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "deleting product");

        sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
