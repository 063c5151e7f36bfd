//! # grocer-db: Database Layer for Grocer
//!
//! SQLite storage behind the repository pattern, using sqlx for async
//! operations.
//!
//! ## Architecture Position
//! ```text
//! grocer-service (ProductService, SaleService, ...)
//!        │
//!        │  db.products().list()
//!        ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                 grocer-db (THIS CRATE)              │
//! │                                                     │
//! │   Database         Repositories      Migrations    │
//! │   (pool.rs)        product / user    (embedded)    │
//! │   SqlitePool       / sale            001_init.sql  │
//! └─────────────────────────────────────────────────────┘
//!        │
//!        ▼
//!   SQLite database file (or :memory: in tests)
//! ```
//!
//! ## Naming Translation
//! This crate is solely responsible for mapping the storage naming
//! convention (snake_case columns like `total_price_cents`, `customer_name`,
//! `product_id`) onto the domain entities, whose serialized application
//! names are camelCase.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Store error types
//! - [`repository`] - Repository implementations (product, user, sale)

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::StoreError;
pub use pool::{Database, DbConfig};

pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
pub use repository::user::UserRepository;
