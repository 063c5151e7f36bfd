//! # Repository Module
//!
//! Repository implementations for the four collections: products, users,
//! sales, sale_items (the last two are owned together by the sale
//! repository, since line items never exist apart from a header).
//!
//! ## Repository Pattern
//! Each repository wraps the pool behind a small API, keeping the SQL - and
//! the storage-to-application naming translation - in one place:
//!
//! ```text
//! service call:   db.products().list()
//!                       │
//!                       ▼
//! ProductRepository ── SQL with snake_case columns ──► SQLite
//! ```

pub mod product;
pub mod sale;
pub mod user;
