//! # grocer-service: Domain Services and Session Gate
//!
//! The operations the presentation layer calls, each gated by the actor's
//! permission set.
//!
//! ## Control Flow
//! ```text
//! Presentation (external)
//!      │  authenticate(...) → Session
//!      ▼
//! Session/Authorization Gate        auth.rs, session.rs
//!      │  session.require(permission)?
//!      ▼
//! Domain Services                   products / users / sales / dashboard
//!      │
//!      ▼
//! grocer-db repositories → SQLite
//! ```
//!
//! Permission checks are enforced HERE on every operation, not just in the
//! UI - a caller holding a Session without `pos_access` cannot record a
//! sale no matter what the screen shows.
//!
//! ## Modules
//!
//! - [`auth`] - Credential check and the login/restore/logout lifecycle
//! - [`session`] - Session object and the persisted session slot
//! - [`products`] - Product/inventory CRUD
//! - [`users`] - User and permission management
//! - [`sales`] - Sale recording (the one multi-step workflow) and history
//! - [`dashboard`] - Derived dashboard figures
//! - [`error`] - Service error taxonomy

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod products;
pub mod sales;
pub mod session;
pub mod users;

pub use auth::{authenticate, login, logout, restore_session};
pub use dashboard::DashboardService;
pub use error::{ServiceError, ServiceResult};
pub use products::ProductService;
pub use sales::SaleService;
pub use session::{Session, SessionStore};
pub use users::{DeleteUserOutcome, UserService};
