//! # Sale Service
//!
//! The checkout workflow - the one multi-step operation in the system - and
//! sale history, gated by `pos_access`.
//!
//! ## Recording a Sale
//! The service composes the full sale up front: server-assigned ID and
//! timestamp, snapshot line items, and the grand total computed as the sum
//! of `price × quantity` per line. Totals are fixed at creation and never
//! recomputed. The repository then lands header, items, and stock
//! decrements in one transaction.
//!
//! Stock sufficiency is the caller's advisory concern
//! ([`grocer_core::validation::check_stock`]); the recorded decrement is
//! unconditional and may drive stock negative when two tills race on the
//! same product.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use grocer_core::{
    validation, CoreError, Money, Permission, Sale, SaleItem, SaleLine, DEFAULT_CUSTOMER_NAME,
};
use grocer_db::Database;

use crate::error::ServiceResult;
use crate::session::Session;

/// Permission-gated sale operations.
#[derive(Debug, Clone)]
pub struct SaleService {
    db: Database,
}

impl SaleService {
    pub fn new(db: Database) -> Self {
        SaleService { db }
    }

    /// Records a sale from the given cart lines and returns the composed
    /// Sale (header + items).
    ///
    /// An empty `customer_name` (or `None`) records as "cash customer".
    /// Fails with a validation error on an empty cart, a non-positive line
    /// quantity, or a negative line price, in which case nothing is
    /// persisted.
    pub async fn record_sale(
        &self,
        session: &Session,
        lines: Vec<SaleLine>,
        customer_name: Option<String>,
    ) -> ServiceResult<Sale> {
        session.require(Permission::PosAccess)?;

        if lines.is_empty() {
            return Err(CoreError::EmptySale.into());
        }
        for line in &lines {
            validation::validate_quantity(line.quantity)?;
            validation::validate_price(line.price_cents)?;
        }

        let sale_id = Uuid::new_v4().to_string();
        let date = Utc::now();

        let items: Vec<SaleItem> = lines
            .into_iter()
            .map(|line| SaleItem {
                id: Uuid::new_v4().to_string(),
                sale_id: sale_id.clone(),
                total_cents: line.total().cents(),
                product_id: line.product_id,
                product_name: line.product_name,
                quantity: line.quantity,
                price_cents: line.price_cents,
            })
            .collect();

        let total_price: Money = items.iter().map(SaleItem::total).sum();

        let customer_name = match customer_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => DEFAULT_CUSTOMER_NAME.to_string(),
        };

        let sale = Sale {
            id: sale_id,
            date,
            total_price_cents: total_price.cents(),
            customer_name,
            items,
        };

        self.db.sales().record(&sale).await?;

        info!(
            id = %sale.id,
            total = sale.total_price_cents,
            items = sale.items.len(),
            "sale recorded"
        );

        Ok(sale)
    }

    /// Lists all sales with their items, newest first.
    pub async fn list_sales(&self, session: &Session) -> ServiceResult<Vec<Sale>> {
        session.require(Permission::PosAccess)?;
        Ok(self.db.sales().list().await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use grocer_core::{NewProduct, PermissionSet, Role, User};
    use grocer_db::DbConfig;

    use crate::error::ServiceError;

    fn session_with(permissions: &[Permission]) -> Session {
        Session::new(User {
            id: "u1".to_string(),
            username: "cashier".to_string(),
            password: "pw".to_string(),
            role: Role::Staff,
            permissions: permissions.iter().copied().collect::<PermissionSet>(),
            created_at: Utc::now(),
        })
    }

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn line(product_id: &str, name: &str, quantity: i64, price_cents: i64) -> SaleLine {
        SaleLine {
            product_id: product_id.to_string(),
            product_name: name.to_string(),
            quantity,
            price_cents,
        }
    }

    #[tokio::test]
    async fn milk_scenario_total_and_stock() {
        let db = db().await;
        let svc = SaleService::new(db.clone());
        let cashier = session_with(&[Permission::PosAccess]);

        let milk = db
            .products()
            .insert(NewProduct {
                name: "Milk".to_string(),
                category: "Dairy".to_string(),
                price_cents: 1000,
                stock: 5,
            })
            .await
            .unwrap();

        let sale = svc
            .record_sale(&cashier, vec![line(&milk.id, "Milk", 2, 1000)], None)
            .await
            .unwrap();

        assert_eq!(sale.total_price_cents, 2000);
        assert_eq!(sale.customer_name, "cash customer");
        assert_eq!(sale.items.len(), 1);

        let after = db.products().get_by_id(&milk.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 3);
    }

    #[tokio::test]
    async fn totals_always_sum_the_items() {
        let db = db().await;
        let svc = SaleService::new(db.clone());
        let cashier = session_with(&[Permission::PosAccess]);

        let sale = svc
            .record_sale(
                &cashier,
                vec![
                    line("p1", "Bread", 3, 1200),
                    line("p2", "Eggs", 1, 7200),
                ],
                Some("Mrs. Karim".to_string()),
            )
            .await
            .unwrap();

        for item in &sale.items {
            assert_eq!(item.total_cents, item.price_cents * item.quantity);
        }
        let sum: i64 = sale.items.iter().map(|i| i.total_cents).sum();
        assert_eq!(sale.total_price_cents, sum);
        assert_eq!(sale.customer_name, "Mrs. Karim");

        // And they round-trip through the store unchanged.
        let listed = svc.list_sales(&cashier).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, sale.id);
        assert_eq!(listed[0].total_price_cents, sale.total_price_cents);
        assert_eq!(listed[0].customer_name, sale.customer_name);
        assert_eq!(listed[0].items, sale.items);
    }

    #[tokio::test]
    async fn empty_cart_is_rejected() {
        let svc = SaleService::new(db().await);
        let cashier = session_with(&[Permission::PosAccess]);

        assert!(matches!(
            svc.record_sale(&cashier, vec![], None).await,
            Err(ServiceError::Core(CoreError::EmptySale))
        ));
    }

    #[tokio::test]
    async fn bad_quantity_persists_nothing() {
        let db = db().await;
        let svc = SaleService::new(db.clone());
        let cashier = session_with(&[Permission::PosAccess]);

        let result = svc
            .record_sale(
                &cashier,
                vec![line("p1", "Bread", 1, 1200), line("p2", "Eggs", 0, 7200)],
                None,
            )
            .await;
        assert!(result.is_err());
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn negative_price_persists_nothing() {
        let db = db().await;
        let svc = SaleService::new(db.clone());
        let cashier = session_with(&[Permission::PosAccess]);

        let result = svc
            .record_sale(&cashier, vec![line("p1", "Bread", 1, -1200)], None)
            .await;
        assert!(matches!(
            result,
            Err(ServiceError::Core(CoreError::Validation(_)))
        ));
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn pos_access_is_enforced_at_the_service() {
        let svc = SaleService::new(db().await);
        // A dashboard-only session: the UI would hide the till, but the
        // service refuses regardless.
        let viewer = session_with(&[Permission::ViewDashboard]);
        assert!(!viewer.has_permission(Permission::PosAccess));

        assert!(matches!(
            svc.record_sale(&viewer, vec![line("p1", "Bread", 1, 1200)], None)
                .await,
            Err(ServiceError::PermissionDenied {
                permission: Permission::PosAccess
            })
        ));
    }
}
