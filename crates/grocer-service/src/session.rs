//! # Session
//!
//! The authenticated actor's session and its persisted slot.
//!
//! ## Lifecycle
//! ```text
//! startup   SessionStore::restore()  → Some(Session) | None
//! login     authenticate(...) then SessionStore::save(&session)
//! runtime   session passed by reference through every service call
//! logout    SessionStore::clear()
//! ```
//!
//! The session is an explicit object handed down the call chain - there is
//! no ambient global user. Persistence is a single string-keyed slot: one
//! JSON file holding the serialized current user, written on login, removed
//! on logout, read once at startup. No expiry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use grocer_core::{Permission, User};

use crate::error::{ServiceError, ServiceResult};

/// Default file name of the session slot. A single slot: logging in
/// overwrites whoever was signed in before.
pub const SESSION_FILE_NAME: &str = "grocer_current_user.json";

// =============================================================================
// Session
// =============================================================================

/// An authenticated actor. Wraps the matched user, permission set included.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user: User,
}

impl Session {
    /// Creates a session for an already-authenticated user. Exposed for the
    /// restore path and for tests; normal callers go through
    /// [`crate::auth::authenticate`].
    pub fn new(user: User) -> Self {
        Session { user }
    }

    /// The authenticated user.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Pure membership test against the session's permission set. The
    /// presentation layer uses this to decide navigation visibility.
    #[inline]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.user.has_permission(permission)
    }

    /// Errors with PermissionDenied unless the session holds `permission`.
    pub fn require(&self, permission: Permission) -> ServiceResult<()> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            Err(ServiceError::PermissionDenied { permission })
        }
    }

    /// Errors unless the session holds at least one of `permissions`.
    /// The denial names the first alternative. An empty slice requires
    /// nothing and passes.
    pub fn require_any(&self, permissions: &[Permission]) -> ServiceResult<()> {
        let Some(&first) = permissions.first() else {
            return Ok(());
        };
        if permissions.iter().any(|p| self.has_permission(*p)) {
            Ok(())
        } else {
            Err(ServiceError::PermissionDenied { permission: first })
        }
    }
}

// =============================================================================
// Session Store
// =============================================================================

/// Errors from the persisted session slot.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// File-backed persistence for the current session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// A store writing to the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionStore { path: path.into() }
    }

    /// A store using [`SESSION_FILE_NAME`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        SessionStore {
            path: dir.as_ref().join(SESSION_FILE_NAME),
        }
    }

    /// Writes the session's user to the slot. Called on login.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        debug!(path = %self.path.display(), "saving session");
        let json = serde_json::to_string(session.user())?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Reads the slot, if present. Called once at startup.
    pub fn restore(&self) -> Result<Option<Session>, SessionError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let user: User = serde_json::from_str(&json)?;
        debug!(username = %user.username, "session restored");
        Ok(Some(Session::new(user)))
    }

    /// Removes the slot. Called on logout; a missing slot is fine.
    pub fn clear(&self) -> Result<(), SessionError> {
        debug!(path = %self.path.display(), "clearing session");
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
