//! # Product Service
//!
//! Product and inventory CRUD, permission-gated.
//!
//! ## Permission Map
//! ```text
//! list     pos_access OR manage_inventory   (the cashier screen needs the
//!                                            catalog too)
//! create   manage_inventory
//! update   manage_inventory
//! delete   delete_inventory                 (a separate, stronger flag)
//! ```

use tracing::info;

use grocer_core::{validation, NewProduct, Permission, Product, ProductPatch};
use grocer_db::Database;

use crate::error::ServiceResult;
use crate::session::Session;

/// Permission-gated product operations.
#[derive(Debug, Clone)]
pub struct ProductService {
    db: Database,
}

impl ProductService {
    pub fn new(db: Database) -> Self {
        ProductService { db }
    }

    /// Lists all products, sorted by name ascending. No side effects.
    pub async fn list(&self, session: &Session) -> ServiceResult<Vec<Product>> {
        session.require_any(&[Permission::ManageInventory, Permission::PosAccess])?;
        Ok(self.db.products().list().await?)
    }

    /// Persists a new product and returns it with its generated ID.
    pub async fn create(&self, session: &Session, new: NewProduct) -> ServiceResult<Product> {
        session.require(Permission::ManageInventory)?;

        validation::validate_product_name(&new.name)?;
        validation::validate_category(&new.category)?;
        validation::validate_price(new.price_cents)?;
        validation::validate_stock(new.stock)?;

        let product = self.db.products().insert(new).await?;
        info!(id = %product.id, name = %product.name, "product created");
        Ok(product)
    }

    /// Merges the given fields into an existing product. Unset fields stay
    /// untouched; an absent ID surfaces as a store NotFound error.
    pub async fn update(
        &self,
        session: &Session,
        id: &str,
        patch: ProductPatch,
    ) -> ServiceResult<()> {
        session.require(Permission::ManageInventory)?;

        if let Some(name) = &patch.name {
            validation::validate_product_name(name)?;
        }
        if let Some(category) = &patch.category {
            validation::validate_category(category)?;
        }
        if let Some(price_cents) = patch.price_cents {
            validation::validate_price(price_cents)?;
        }
        if let Some(stock) = patch.stock {
            validation::validate_stock(stock)?;
        }

        if patch.is_empty() {
            return Ok(());
        }

        self.db.products().update(id, patch).await?;
        info!(id = %id, "product updated");
        Ok(())
    }

    /// Removes a product. Idempotent by ID: repeated deletes of a missing
    /// ID do not error.
    pub async fn delete(&self, session: &Session, id: &str) -> ServiceResult<()> {
        session.require(Permission::DeleteInventory)?;
        self.db.products().delete(id).await?;
        info!(id = %id, "product deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use grocer_core::{PermissionSet, Role, User};
    use grocer_db::DbConfig;

    use crate::error::ServiceError;

    fn session_with(permissions: &[Permission]) -> Session {
        Session::new(User {
            id: "u1".to_string(),
            username: "staff".to_string(),
            password: "pw".to_string(),
            role: Role::Staff,
            permissions: permissions.iter().copied().collect::<PermissionSet>(),
            created_at: Utc::now(),
        })
    }

    async fn service() -> ProductService {
        ProductService::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    fn milk() -> NewProduct {
        NewProduct {
            name: "Milk".to_string(),
            category: "Dairy".to_string(),
            price_cents: 1000,
            stock: 5,
        }
    }

    #[tokio::test]
    async fn create_then_list_includes_all_fields_and_fresh_id() {
        let svc = service().await;
        let manager = session_with(&[Permission::ManageInventory]);

        let created = svc.create(&manager, milk()).await.unwrap();
        let listed = svc.list(&manager).await.unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].name, "Milk");
        assert_eq!(listed[0].category, "Dairy");
        assert_eq!(listed[0].price_cents, 1000);
        assert_eq!(listed[0].stock, 5);
    }

    #[tokio::test]
    async fn cashier_can_list_but_not_edit() {
        let svc = service().await;
        let manager = session_with(&[Permission::ManageInventory]);
        let cashier = session_with(&[Permission::PosAccess]);

        svc.create(&manager, milk()).await.unwrap();

        assert_eq!(svc.list(&cashier).await.unwrap().len(), 1);
        assert!(matches!(
            svc.create(&cashier, milk()).await,
            Err(ServiceError::PermissionDenied { .. })
        ));
    }

    #[tokio::test]
    async fn delete_needs_its_own_flag() {
        let svc = service().await;
        let manager = session_with(&[Permission::ManageInventory]);
        let created = svc.create(&manager, milk()).await.unwrap();

        // manage_inventory alone is not enough to delete.
        assert!(matches!(
            svc.delete(&manager, &created.id).await,
            Err(ServiceError::PermissionDenied {
                permission: Permission::DeleteInventory
            })
        ));

        let destroyer = session_with(&[Permission::DeleteInventory, Permission::ManageInventory]);
        svc.delete(&destroyer, &created.id).await.unwrap();
        svc.delete(&destroyer, &created.id).await.unwrap(); // idempotent
    }

    #[tokio::test]
    async fn create_rejects_negative_price() {
        let svc = service().await;
        let manager = session_with(&[Permission::ManageInventory]);

        let result = svc
            .create(
                &manager,
                NewProduct {
                    price_cents: -5,
                    ..milk()
                },
            )
            .await;
        assert!(matches!(result, Err(ServiceError::Core(_))));
    }
}
