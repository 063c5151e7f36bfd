//! # Domain Types
//!
//! Core domain types used throughout Grocer.
//!
//! ## Naming Convention
//! In-memory entities use Rust snake_case fields and serialize to camelCase
//! (the application field names the presentation layer sees). The remote
//! store uses its own flattened snake_case column names; the grocer-db
//! repositories own that translation (`total_price_cents` ↔ `totalPrice`,
//! `customer_name` ↔ `customerName`, `product_id` ↔ `productId`).
//!
//! ## Snapshot Pattern
//! A sale line freezes the product's name and price at transaction time, so
//! sale history stays intact when products are edited or deleted later.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// Product
// =============================================================================

/// A product on the shelf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to the cashier and on the invoice.
    pub name: String,

    /// Free-form category label ("Dairy", "Bakery", ...).
    pub category: String,

    /// Shelf price in cents, tax-inclusive. Never negative.
    pub price_cents: i64,

    /// Units currently in stock. Decremented only via sale recording
    /// or direct inventory edits.
    pub stock: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the shelf price as a Money value.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Whether this product appears in the dashboard's low-stock list.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }
}

/// Fields for creating a product (id and timestamps are assigned by the
/// service).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price_cents: i64,
    pub stock: i64,
}

/// Partial update for a product. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price_cents: Option<i64>,
    pub stock: Option<i64>,
}

impl ProductPatch {
    /// True when no field is set; the store call can be skipped.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price_cents.is_none()
            && self.stock.is_none()
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One line of a sale: a snapshot of a product at transaction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: String,
    pub sale_id: String,

    /// Product this line was sold from. Dangling references are fine:
    /// the snapshot fields below carry everything the invoice needs.
    pub product_id: String,

    /// Product name at sale time (frozen).
    pub product_name: String,

    /// Quantity sold. Always positive.
    pub quantity: i64,

    /// Unit price in cents at sale time (frozen).
    pub price_cents: i64,

    /// Line total: `price_cents * quantity`.
    pub total_cents: i64,
}

impl SaleItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// A recorded sale: header plus its ordered, non-empty line items.
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,

    /// Server-assigned timestamp of the transaction.
    pub date: DateTime<Utc>,

    /// Grand total: the sum of the items' totals, fixed at creation and
    /// never recomputed afterwards.
    pub total_price_cents: i64,

    /// Customer name, defaulting to "cash customer" when left blank.
    pub customer_name: String,

    pub items: Vec<SaleItem>,
}

impl Sale {
    /// Returns the grand total as Money.
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

/// One cart entry handed to `record_sale`. The service snapshots the
/// product name and price into the stored line item and computes the
/// line total itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub price_cents: i64,
}

impl SaleLine {
    /// Line total: unit price × quantity.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.price_cents).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Users & Permissions
// =============================================================================

/// Coarse actor classification, distinct from the fine-grained permission
/// set. The role carries no authority by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
}

/// A capability flag gating one feature area. Independent of role.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewDashboard,
    ManageInventory,
    DeleteInventory,
    PosAccess,
    ManageUsers,
}

impl Permission {
    /// Every permission, in display order.
    pub const ALL: [Permission; 5] = [
        Permission::ViewDashboard,
        Permission::ManageInventory,
        Permission::DeleteInventory,
        Permission::PosAccess,
        Permission::ManageUsers,
    ];

    /// Wire name, matching the serde representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "view_dashboard",
            Permission::ManageInventory => "manage_inventory",
            Permission::DeleteInventory => "delete_inventory",
            Permission::PosAccess => "pos_access",
            Permission::ManageUsers => "manage_users",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of capability flags granted to a user.
pub type PermissionSet = BTreeSet<Permission>;

/// An account that can log in to the system.
///
/// The password is stored and compared in plaintext. A production-grade
/// deployment should move to salted hashing; this is flagged deliberately
/// rather than hidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub role: Role,
    pub permissions: PermissionSet,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Pure membership test against the user's permission set.
    ///
    /// The presentation layer uses this for navigation visibility; the
    /// service layer re-enforces it on every operation.
    #[inline]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

/// Fields for creating a user (id and created_at are assigned by the
/// service). Username uniqueness is NOT enforced; callers must not rely
/// on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub permissions: PermissionSet,
}

/// Partial update for a user. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub permissions: Option<PermissionSet>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password.is_none()
            && self.role.is_none()
            && self.permissions.is_none()
    }
}

// =============================================================================
// Dashboard
// =============================================================================

/// Derived dashboard figures. Recomputed from a full read on every request,
/// never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: usize,
    pub total_sales_count: usize,
    pub total_revenue_cents: i64,
    pub low_stock_items: Vec<Product>,
}

// =============================================================================
// Unit Tests
// =============================================================================
