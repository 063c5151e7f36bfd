//! # Sale Repository
//!
//! Database operations for sales and their line items.
//!
//! ## Recording Is Atomic
//! ```text
//! record(header, items)
//!   BEGIN
//!     1. INSERT sale header (server-assigned id and date)
//!     2. INSERT one line item per cart entry
//!     3. UPDATE products stock -= quantity, per line
//!   COMMIT
//! ```
//! All three steps run in one transaction: either the whole sale lands or
//! none of it does. A failure partway never leaves an orphaned header or
//! stale stock.
//!
//! The stock decrement is unconditional and skips silently when the product
//! no longer exists - sufficiency checking is the caller's advisory concern.

use std::collections::HashMap;

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;
use grocer_core::{Sale, SaleItem};

/// A raw `sales` header row; items are attached from a second query.
#[derive(Debug, sqlx::FromRow)]
struct SaleHeaderRow {
    id: String,
    date: chrono::DateTime<chrono::Utc>,
    total_price_cents: i64,
    customer_name: String,
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a complete sale in a single transaction: header, line items,
    /// and the stock decrement for every line.
    ///
    /// The `sale` must already be fully composed (ids, date, totals); the
    /// service layer owns that. Items referencing products that have since
    /// been deleted still record fine - their decrement is a no-op.
    pub async fn record(&self, sale: &Sale) -> StoreResult<()> {
        debug!(id = %sale.id, items = sale.items.len(), total = sale.total_price_cents, "recording sale");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO sales (id, date, total_price_cents, customer_name)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&sale.id)
        .bind(sale.date)
        .bind(sale.total_price_cents)
        .bind(&sale.customer_name)
        .execute(&mut *tx)
        .await?;

        for item in &sale.items {
            sqlx::query(
                r#"
                INSERT INTO sale_items
                    (id, sale_id, product_id, product_name, quantity, price_cents, total_cents)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(&item.id)
            .bind(&item.sale_id)
            .bind(&item.product_id)
            .bind(&item.product_name)
            .bind(item.quantity)
            .bind(item.price_cents)
            .bind(item.total_cents)
            .execute(&mut *tx)
            .await?;

            // Unconditional read-modify-write folded into one statement.
            // A missing product affects zero rows, matching the source
            // system's silent skip.
            sqlx::query(
                r#"
                UPDATE products
                SET stock = stock - ?2, updated_at = ?3
                WHERE id = ?1
                "#,
            )
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(sale.date)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Lists all sales with their items, newest first. Items keep their
    /// insertion order within each sale.
    pub async fn list(&self) -> StoreResult<Vec<Sale>> {
        let headers = sqlx::query_as::<_, SaleHeaderRow>(
            r#"
            SELECT id, date, total_price_cents, customer_name
            FROM sales
            ORDER BY date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, product_id, product_name, quantity, price_cents, total_cents
            FROM sale_items
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_sale: HashMap<String, Vec<SaleItem>> = HashMap::new();
        for item in items {
            by_sale.entry(item.sale_id.clone()).or_default().push(item);
        }

        Ok(headers
            .into_iter()
            .map(|h| Sale {
                items: by_sale.remove(&h.id).unwrap_or_default(),
                id: h.id,
                date: h.date,
                total_price_cents: h.total_price_cents,
                customer_name: h.customer_name,
            })
            .collect())
    }

    /// Number of recorded sales.
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Sum of all sale totals, in cents. Zero when no sales exist.
    pub async fn total_revenue_cents(&self) -> StoreResult<i64> {
        let total: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(total_price_cents), 0) FROM sales")
                .fetch_one(&self.pool)
                .await?;
        Ok(total)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
