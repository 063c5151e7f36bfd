//! # Service Error Type
//!
//! The error taxonomy the presentation layer catches.
//!
//! ## Taxonomy
//! ```text
//! Authentication      credentials match no user; deliberately generic,
//!                     no hint which field was wrong
//! PermissionDenied    the session lacks the capability flag an operation
//!                     requires
//! Core                business rule violation (empty sale, bad quantity...)
//! Store               any remote store failure, propagated untranslated -
//!                     no retry policy anywhere in the system
//! Session             the persisted session slot could not be read/written
//! ```

use thiserror::Error;

use grocer_core::{CoreError, Permission, ValidationError};
use grocer_db::StoreError;

use crate::session::SessionError;

/// Errors surfaced by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Username/password matched no user. The message stays generic on
    /// purpose: callers must not learn which field was wrong.
    #[error("invalid username or password")]
    Authentication,

    /// The session's permission set lacks the required capability.
    #[error("permission denied: {permission} required")]
    PermissionDenied { permission: Permission },

    /// Business rule violation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Remote store failure, untranslated.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The persisted session slot could not be read or written.
    #[error("session persistence failed: {0}")]
    Session(#[from] SessionError),
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Core(CoreError::Validation(err))
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
