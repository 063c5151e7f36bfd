//! # Dashboard Service
//!
//! Derived figures for the landing screen, gated by `view_dashboard`.
//!
//! Everything is recomputed from a full re-read of products and sales on
//! each request - no incremental maintenance, no caching. Fine at this
//! shop's scale.

use grocer_core::{DashboardStats, Permission};
use grocer_db::Database;

use crate::error::ServiceResult;
use crate::session::Session;

/// Permission-gated dashboard aggregation.
#[derive(Debug, Clone)]
pub struct DashboardService {
    db: Database,
}

impl DashboardService {
    pub fn new(db: Database) -> Self {
        DashboardService { db }
    }

    /// Recomputes product count, sale count, total revenue, and the
    /// low-stock list (stock < 10).
    pub async fn stats(&self, session: &Session) -> ServiceResult<DashboardStats> {
        session.require(Permission::ViewDashboard)?;

        let products = self.db.products().list().await?;
        let total_sales_count = self.db.sales().count().await? as usize;
        let total_revenue_cents = self.db.sales().total_revenue_cents().await?;

        let total_products = products.len();
        let low_stock_items = products.into_iter().filter(|p| p.is_low_stock()).collect();

        Ok(DashboardStats {
            total_products,
            total_sales_count,
            total_revenue_cents,
            low_stock_items,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use grocer_core::{NewProduct, PermissionSet, Role, SaleLine, User};
    use grocer_db::DbConfig;

    use crate::error::ServiceError;
    use crate::sales::SaleService;

    fn session_with(permissions: &[Permission]) -> Session {
        Session::new(User {
            id: "u1".to_string(),
            username: "owner".to_string(),
            password: "pw".to_string(),
            role: Role::Admin,
            permissions: permissions.iter().copied().collect::<PermissionSet>(),
            created_at: Utc::now(),
        })
    }

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn add_product(db: &Database, name: &str, stock: i64) {
        db.products()
            .insert(NewProduct {
                name: name.to_string(),
                category: "Misc".to_string(),
                price_cents: 500,
                stock,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn empty_store_yields_zeroes() {
        let svc = DashboardService::new(db().await);
        let viewer = session_with(&[Permission::ViewDashboard]);

        let stats = svc.stats(&viewer).await.unwrap();
        assert_eq!(stats.total_products, 0);
        assert_eq!(stats.total_sales_count, 0);
        assert_eq!(stats.total_revenue_cents, 0);
        assert!(stats.low_stock_items.is_empty());
    }

    #[tokio::test]
    async fn low_stock_is_exactly_the_under_ten_subset() {
        let db = db().await;
        let svc = DashboardService::new(db.clone());
        let viewer = session_with(&[Permission::ViewDashboard]);

        add_product(&db, "Plenty", 10).await;
        add_product(&db, "Scarce", 9).await;
        add_product(&db, "Gone", 0).await;

        let stats = svc.stats(&viewer).await.unwrap();
        assert_eq!(stats.total_products, 3);

        let mut low: Vec<String> = stats
            .low_stock_items
            .into_iter()
            .map(|p| p.name)
            .collect();
        low.sort();
        assert_eq!(low, vec!["Gone", "Scarce"]);
    }

    #[tokio::test]
    async fn revenue_tracks_recorded_sales() {
        let db = db().await;
        let dashboard = DashboardService::new(db.clone());
        let sales = SaleService::new(db.clone());
        let owner = session_with(&[Permission::ViewDashboard, Permission::PosAccess]);

        sales
            .record_sale(
                &owner,
                vec![SaleLine {
                    product_id: "p1".to_string(),
                    product_name: "Bread".to_string(),
                    quantity: 2,
                    price_cents: 1200,
                }],
                None,
            )
            .await
            .unwrap();

        let stats = dashboard.stats(&owner).await.unwrap();
        assert_eq!(stats.total_sales_count, 1);
        assert_eq!(stats.total_revenue_cents, 2400);
    }

    #[tokio::test]
    async fn dashboard_requires_its_flag() {
        let svc = DashboardService::new(db().await);
        let cashier = session_with(&[Permission::PosAccess]);

        assert!(matches!(
            svc.stats(&cashier).await,
            Err(ServiceError::PermissionDenied {
                permission: Permission::ViewDashboard
            })
        ));
    }
}
