//! # grocer-core: Pure Business Logic for Grocer
//!
//! This crate is the heart of the system. It contains all business logic as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! Presentation (external)          UI screens, forms, invoice printing
//!        │
//!        ▼
//! grocer-service                   Domain services + session gate
//!        │
//!        ▼
//! ★ grocer-core (THIS CRATE) ★     types - money - permissions - validation
//!        │                         NO I/O - NO DATABASE - PURE FUNCTIONS
//!        ▼
//! grocer-db                        SQLite queries, migrations, repositories
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, User, Permission, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`invoice`] - Invoice view math (inclusive tax breakdown for display)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: deterministic, same input = same output
//! 2. **Integer money**: all monetary values are cents (i64), never floats
//! 3. **Explicit errors**: typed errors, never strings or panics

pub mod error;
pub mod invoice;
pub mod money;
pub mod types;
pub mod validation;

pub use error::{CoreError, ValidationError};
pub use invoice::{InvoiceLine, InvoiceView};
pub use money::{Money, TaxBreakdown, TaxRate};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level below which a product counts as "low stock" on the dashboard.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Username of the protected super-admin. This account can never be deleted,
/// by any actor.
pub const PROTECTED_USERNAME: &str = "osama";

/// Customer name recorded when the cashier leaves the field blank.
pub const DEFAULT_CUSTOMER_NAME: &str = "cash customer";

/// Tax rate baked into shelf prices, in basis points (1400 = 14%).
///
/// Prices are tax-inclusive; the invoice shows a derived net/tax breakdown
/// for display only. Nothing tax-related is ever stored.
pub const INCLUSIVE_TAX_RATE_BPS: u32 = 1400;

/// Maximum quantity of a single item on one sale line.
///
/// Guards against fat-finger entries (1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
