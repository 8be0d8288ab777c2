/// User model and database operations
///
/// This module provides the User model and CRUD operations for accounts.
/// An account is either registered (email + Argon2id password hash) or
/// anonymous (no email, no credential, `is_anonymous = true`).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email CITEXT UNIQUE,
///     password_hash VARCHAR(255),
///     is_anonymous BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Invariant: a user without an email is anonymous. Email is unique when
/// present (case-insensitive via CITEXT).
///
/// # Example
///
/// ```no_run
/// use dayplan_shared::models::user::{CreateUser, User};
/// use dayplan_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(
///     &pool,
///     CreateUser::registered("user@example.com".to_string(), "$argon2id$...".to_string()),
/// )
/// .await?;
/// println!("Created user: {}", user.id);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// User model representing an account
///
/// Passwords are stored as Argon2id hashes, never in plaintext. Anonymous
/// users carry neither email nor credential.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Email address (case-insensitive via CITEXT); absent for anonymous users
    pub email: Option<String>,

    /// Argon2id password hash; absent for anonymous users
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    /// Whether this is an anonymous account
    pub is_anonymous: bool,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address (None for anonymous accounts)
    pub email: Option<String>,

    /// Argon2id password hash (NOT a plaintext password)
    pub password_hash: Option<String>,

    /// Anonymous flag
    pub is_anonymous: bool,
}

impl CreateUser {
    /// Input for an anonymous account
    pub fn anonymous() -> Self {
        Self {
            email: None,
            password_hash: None,
            is_anonymous: true,
        }
    }

    /// Input for a registered account
    pub fn registered(email: String, password_hash: String) -> Self {
        Self {
            email: Some(email),
            password_hash: Some(password_hash),
            is_anonymous: false,
        }
    }
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists (unique constraint
    /// violation) or the database operation fails.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, is_anonymous)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, is_anonymous, created_at, updated_at
            "#,
        )
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.is_anonymous)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// Returns the user if found, None otherwise.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, is_anonymous, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    ///
    /// Lookup is case-insensitive (CITEXT column). Anonymous users have no
    /// email and are never returned here.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, is_anonymous, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Deletes a user by ID
    ///
    /// Deleting a user also deletes every todo they own via ON DELETE CASCADE.
    /// No endpoint exposes this; it exists to uphold referential integrity.
    ///
    /// Returns true if a user was deleted, false if the id was unknown.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_anonymous() {
        let data = CreateUser::anonymous();
        assert!(data.email.is_none());
        assert!(data.password_hash.is_none());
        assert!(data.is_anonymous);
    }

    #[test]
    fn test_create_user_registered() {
        let data = CreateUser::registered("test@example.com".to_string(), "hash".to_string());
        assert_eq!(data.email.as_deref(), Some("test@example.com"));
        assert_eq!(data.password_hash.as_deref(), Some("hash"));
        assert!(!data.is_anonymous);
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            email: Some("test@example.com".to_string()),
            password_hash: Some("$argon2id$secret".to_string()),
            is_anonymous: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("test@example.com"));
    }

    // Integration tests for database operations are in tests/db_todo_tests.rs
}
