//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    user_id::UserId, user_name::UserName, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = r#"
    user_id,
    first_name,
    last_name,
    user_name,
    email,
    password_hash,
    password_salt,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_name = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_name.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_name = $1)",
        )
        .bind(user_name.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn insert(&self, user: &User) -> AuthResult<User> {
        let sql = format!(
            r#"
            INSERT INTO users (
                user_id,
                first_name,
                last_name,
                user_name,
                email,
                password_hash,
                password_salt,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.user_id.as_uuid())
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.user_name.as_str())
            .bind(&user.email)
            .bind(user.password.hash())
            .bind(user.password.salt())
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, &user.user_name))?;

        row.into_user()
    }

    async fn update(&self, user: &User) -> AuthResult<User> {
        let sql = format!(
            r#"
            UPDATE users SET
                first_name = $2,
                last_name = $3,
                user_name = $4,
                email = $5,
                password_hash = $6,
                password_salt = $7,
                updated_at = $8
            WHERE user_id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.user_id.as_uuid())
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.user_name.as_str())
            .bind(&user.email)
            .bind(user.password.hash())
            .bind(user.password.salt())
            .bind(user.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, &user.user_name))?;

        row.ok_or(AuthError::UserNotFound)?.into_user()
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<()> {
        let deleted = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            tracing::debug!(user_id = %user_id, "Delete of absent user");
        }

        Ok(())
    }
}

/// Unique index on `users.user_name`
const USER_NAME_CONSTRAINT: &str = "users_user_name_key";

/// The user name constraint closes the check-then-insert race.
/// Other violations (a duplicate `user_id`) stay database errors.
fn map_unique_violation(err: sqlx::Error, user_name: &UserName) -> AuthError {
    match &err {
        sqlx::Error::Database(db_err)
            if db_err.is_unique_violation()
                && db_err.constraint() == Some(USER_NAME_CONSTRAINT) =>
        {
            AuthError::UserNameTaken(user_name.to_string())
        }
        _ => AuthError::Database(err),
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    first_name: String,
    last_name: String,
    user_name: String,
    email: String,
    password_hash: Vec<u8>,
    password_salt: Vec<u8>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password = UserPassword::from_db(&self.password_hash, &self.password_salt)
            .inspect_err(|_| {
                tracing::error!(user_id = %self.user_id, "Stored credential has invalid length");
            })?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            first_name: self.first_name,
            last_name: self.last_name,
            user_name: UserName::from_db(self.user_name),
            email: self.email,
            password,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
