//! # User Repository
//!
//! Database operations for user accounts.
//!
//! The permission set is stored as a JSON array in a TEXT column; this
//! module owns both directions of that encoding. Passwords are stored in
//! plaintext; this is a known weakness, flagged in the `User` type docs
//! rather than silently fixed.
//!
//! Username uniqueness is NOT enforced here or in the schema; callers must
//! not rely on it.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use grocer_core::{NewUser, PermissionSet, Role, User, UserPatch};

/// A raw `users` row. Converted into the domain `User` by decoding the
/// permissions JSON column.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    username: String,
    password: String,
    role: Role,
    permissions: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> StoreResult<User> {
        let permissions: PermissionSet = serde_json::from_str(&self.permissions)
            .map_err(|e| StoreError::CorruptRow(format!("user {} permissions: {}", self.id, e)))?;

        Ok(User {
            id: self.id,
            username: self.username,
            password: self.password,
            role: self.role,
            permissions,
            created_at: self.created_at,
        })
    }
}

fn encode_permissions(permissions: &PermissionSet) -> StoreResult<String> {
    serde_json::to_string(permissions)
        .map_err(|e| StoreError::Internal(format!("encoding permissions: {}", e)))
}

const SELECT_COLUMNS: &str = "id, username, password, role, permissions, created_at";

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Lists all users, password field included (a documented weakness:
    /// the admin screen edits passwords in place as plaintext).
    pub async fn list(&self) -> StoreResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    /// Gets a user by ID.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = ?1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Finds a user whose username and password match exactly (plaintext
    /// equality filter). Returns None on no match.
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE username = ?1 AND password = ?2 LIMIT 1",
            SELECT_COLUMNS
        ))
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Inserts a new user with a generated ID and returns it.
    pub async fn insert(&self, new: NewUser) -> StoreResult<User> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: new.username,
            password: new.password,
            role: new.role,
            permissions: new.permissions,
            created_at: Utc::now(),
        };

        debug!(id = %user.id, username = %user.username, "inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (id, username, password, role, permissions, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.password)
        .bind(user.role)
        .bind(encode_permissions(&user.permissions)?)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(user)
    }

    /// Merges the given fields into an existing user. Unset fields are left
    /// untouched. Returns NotFound when the ID is absent.
    pub async fn update(&self, id: &str, patch: UserPatch) -> StoreResult<()> {
        debug!(id = %id, "updating user");

        let permissions_json = patch
            .permissions
            .as_ref()
            .map(encode_permissions)
            .transpose()?;

        let result = sqlx::query(
            r#"
            UPDATE users SET
                username    = COALESCE(?2, username),
                password    = COALESCE(?3, password),
                role        = COALESCE(?4, role),
                permissions = COALESCE(?5, permissions)
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(patch.username)
        .bind(patch.password)
        .bind(patch.role)
        .bind(permissions_json)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("User", id));
        }

        Ok(())
    }

    /// Deletes a user. Idempotent: deleting a missing ID is Ok.
    ///
    /// The protected super-admin rule lives in the service layer, which
    /// checks the target's username before calling this.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "deleting user");

        sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
