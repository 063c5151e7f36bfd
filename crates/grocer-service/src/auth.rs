//! # Authentication
//!
//! Credential check and the login/restore/logout lifecycle.
//!
//! Matching is an exact plaintext comparison against the stored password,
//! executed as an equality filter in the store - no hashing, no lockout, no
//! throttling. This is a deliberate, flagged weakness rather than a silent
//! one; see the `User` type docs.

use tracing::{info, warn};

use grocer_db::Database;

use crate::error::{ServiceError, ServiceResult};
use crate::session::{Session, SessionStore};

/// Looks up a user whose username and password match exactly.
///
/// On a match, returns a [`Session`] carrying the full user, permission set
/// included. On no match, returns a generic [`ServiceError::Authentication`]
/// with no detail on which field was wrong.
pub async fn authenticate(db: &Database, username: &str, password: &str) -> ServiceResult<Session> {
    match db.users().find_by_credentials(username, password).await? {
        Some(user) => {
            info!(username = %user.username, "authenticated");
            Ok(Session::new(user))
        }
        None => {
            warn!(username = %username, "authentication rejected");
            Err(ServiceError::Authentication)
        }
    }
}

/// Authenticates and persists the session to the slot.
pub async fn login(
    db: &Database,
    store: &SessionStore,
    username: &str,
    password: &str,
) -> ServiceResult<Session> {
    let session = authenticate(db, username, password).await?;
    store.save(&session)?;
    Ok(session)
}

/// Clears the persisted session slot.
pub fn logout(store: &SessionStore) -> ServiceResult<()> {
    store.clear()?;
    Ok(())
}

/// Reads the persisted session slot at startup, if one exists.
pub fn restore_session(store: &SessionStore) -> ServiceResult<Option<Session>> {
    Ok(store.restore()?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use grocer_core::{NewUser, Permission, PermissionSet, Role};
    use grocer_db::DbConfig;

    async fn db_with_osama() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.users()
            .insert(NewUser {
                username: "osama".to_string(),
                password: "admin".to_string(),
                role: Role::Admin,
                permissions: PermissionSet::from(Permission::ALL),
            })
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn wrong_password_is_a_generic_rejection() {
        let db = db_with_osama().await;
        let err = authenticate(&db, "osama", "wrongpass").await.unwrap_err();
        assert!(matches!(err, ServiceError::Authentication));
        assert_eq!(err.to_string(), "invalid username or password");
    }

    #[tokio::test]
    async fn correct_password_yields_session_with_permissions() {
        let db = db_with_osama().await;
        let session = authenticate(&db, "osama", "admin").await.unwrap();
        assert_eq!(session.user().username, "osama");
        for p in Permission::ALL {
            assert!(session.has_permission(p));
        }
    }

    #[tokio::test]
    async fn login_persists_and_logout_clears() {
        let db = db_with_osama().await;
        let dir = std::env::temp_dir().join(format!("grocer-auth-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let store = SessionStore::in_dir(&dir);

        let session = login(&db, &store, "osama", "admin").await.unwrap();
        let restored = restore_session(&store).unwrap().unwrap();
        assert_eq!(restored, session);

        logout(&store).unwrap();
        assert!(restore_session(&store).unwrap().is_none());

        std::fs::remove_dir_all(&dir).ok();
    }
}
