//! # User Service
//!
//! User and permission management, gated by `manage_users`.
//!
//! ## The Protected Super-Admin
//! The user named "osama" can never be deleted, by any actor. The source
//! system silently no-opped that delete, leaving callers unable to tell
//! "protected" from "succeeded"; here the outcome is an explicit tag
//! ([`DeleteUserOutcome`]) so callers can distinguish - still never an
//! error.

use serde::Serialize;
use tracing::{info, warn};

use grocer_core::{validation, NewUser, Permission, User, UserPatch, PROTECTED_USERNAME};
use grocer_db::Database;

use crate::error::ServiceResult;
use crate::session::Session;

/// What happened to a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteUserOutcome {
    /// The row was removed (or was already gone - deletes are idempotent).
    Deleted,
    /// The target is the protected super-admin; nothing was touched.
    Protected,
}

/// Permission-gated user management.
#[derive(Debug, Clone)]
pub struct UserService {
    db: Database,
}

impl UserService {
    pub fn new(db: Database) -> Self {
        UserService { db }
    }

    /// Lists all users. The password field is included - a documented
    /// weakness; the admin screen edits passwords in place as plaintext.
    pub async fn list(&self, session: &Session) -> ServiceResult<Vec<User>> {
        session.require(Permission::ManageUsers)?;
        Ok(self.db.users().list().await?)
    }

    /// Persists a new user with the chosen permission set and returns it.
    ///
    /// Username uniqueness is NOT enforced; callers must not rely on it.
    pub async fn create(&self, session: &Session, new: NewUser) -> ServiceResult<User> {
        session.require(Permission::ManageUsers)?;

        validation::validate_username(&new.username)?;
        validation::validate_password(&new.password)?;

        let user = self.db.users().insert(new).await?;
        info!(id = %user.id, username = %user.username, "user created");
        Ok(user)
    }

    /// Merges the given fields into an existing user.
    pub async fn update(&self, session: &Session, id: &str, patch: UserPatch) -> ServiceResult<()> {
        session.require(Permission::ManageUsers)?;

        if let Some(username) = &patch.username {
            validation::validate_username(username)?;
        }
        if let Some(password) = &patch.password {
            validation::validate_password(password)?;
        }

        if patch.is_empty() {
            return Ok(());
        }

        self.db.users().update(id, patch).await?;
        info!(id = %id, "user updated");
        Ok(())
    }

    /// Deletes a user, unless the target is the protected super-admin.
    ///
    /// The target's username is looked up first; if it is
    /// [`PROTECTED_USERNAME`] the row is left untouched and `Protected` is
    /// returned. A missing ID deletes nothing and still reports `Deleted`
    /// (delete is idempotent).
    pub async fn delete(&self, session: &Session, id: &str) -> ServiceResult<DeleteUserOutcome> {
        session.require(Permission::ManageUsers)?;

        if let Some(target) = self.db.users().get_by_id(id).await? {
            if target.username == PROTECTED_USERNAME {
                warn!(id = %id, "refused to delete protected super-admin");
                return Ok(DeleteUserOutcome::Protected);
            }
        }

        self.db.users().delete(id).await?;
        info!(id = %id, "user deleted");
        Ok(DeleteUserOutcome::Deleted)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use grocer_core::{PermissionSet, Role};
    use grocer_db::DbConfig;

    use crate::error::ServiceError;

    fn admin_session() -> Session {
        Session::new(User {
            id: "admin".to_string(),
            username: "boss".to_string(),
            password: "pw".to_string(),
            role: Role::Admin,
            permissions: PermissionSet::from(Permission::ALL),
            created_at: Utc::now(),
        })
    }

    async fn service() -> UserService {
        UserService::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: "pw".to_string(),
            role: Role::Staff,
            permissions: PermissionSet::new(),
        }
    }

    #[tokio::test]
    async fn osama_is_never_deleted_by_anyone() {
        let svc = service().await;
        let admin = admin_session();

        let osama = svc.create(&admin, new_user("osama")).await.unwrap();

        let outcome = svc.delete(&admin, &osama.id).await.unwrap();
        assert_eq!(outcome, DeleteUserOutcome::Protected);

        // The row is still there.
        let users = svc.list(&admin).await.unwrap();
        assert!(users.iter().any(|u| u.id == osama.id));
    }

    #[tokio::test]
    async fn other_users_delete_normally() {
        let svc = service().await;
        let admin = admin_session();

        let staff = svc.create(&admin, new_user("staff")).await.unwrap();
        assert_eq!(
            svc.delete(&admin, &staff.id).await.unwrap(),
            DeleteUserOutcome::Deleted
        );
        // Missing ID is still a Deleted outcome, not an error.
        assert_eq!(
            svc.delete(&admin, &staff.id).await.unwrap(),
            DeleteUserOutcome::Deleted
        );
    }

    #[tokio::test]
    async fn user_management_requires_the_flag() {
        let svc = service().await;
        let nobody = Session::new(User {
            id: "u9".to_string(),
            username: "nobody".to_string(),
            password: "pw".to_string(),
            role: Role::Staff,
            permissions: PermissionSet::new(),
            created_at: Utc::now(),
        });

        assert!(matches!(
            svc.list(&nobody).await,
            Err(ServiceError::PermissionDenied {
                permission: Permission::ManageUsers
            })
        ));
    }

    #[tokio::test]
    async fn list_includes_the_password_field() {
        let svc = service().await;
        let admin = admin_session();
        svc.create(&admin, new_user("staff")).await.unwrap();

        let users = svc.list(&admin).await.unwrap();
        assert_eq!(users[0].password, "pw");
    }
}
