//! User repository for database operations.

use chrono::Utc;
use estate_auth::Role;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{info, warn};
use uuid::Uuid;

use super::parse_uuid;
use crate::entities::User;
use crate::types::{RepositoryError, RepositoryResult};

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a user. A taken email surfaces as [`RepositoryError::Conflict`].
    pub async fn create(&self, user: &User) -> RepositoryResult<()> {
        info!(user_id = %user.id, "create user");

        sqlx::query(
            "INSERT INTO users (user_id, email, password_hash, role, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let err = RepositoryError::from_sqlx("user", "user", e);
            warn!(user_id = %user.id, error = %err, "user create failed");
            err
        })?;

        Ok(())
    }

    pub async fn get_by_id(&self, id: Uuid) -> RepositoryResult<User> {
        let row = sqlx::query(
            "SELECT user_id, email, password_hash, role FROM users WHERE user_id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx("user", "user", e))?;

        match row {
            Some(row) => map_user(&row),
            None => Err(RepositoryError::NotFound("user".to_string())),
        }
    }

    pub async fn get_by_email(&self, email: &str) -> RepositoryResult<User> {
        let row = sqlx::query(
            "SELECT user_id, email, password_hash, role FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx("user", "user", e))?;

        match row {
            Some(row) => map_user(&row),
            None => Err(RepositoryError::NotFound("user".to_string())),
        }
    }
}

fn map_user(row: &SqliteRow) -> RepositoryResult<User> {
    let get = |column: &str| -> RepositoryResult<String> {
        row.try_get(column)
            .map_err(|e| RepositoryError::Storage(e.to_string()))
    };

    let role = get("role")?;
    let role = Role::parse(&role).map_err(|e| RepositoryError::Storage(e.to_string()))?;

    Ok(User {
        id: parse_uuid(&get("user_id")?)?,
        email: get("email")?,
        password_hash: get("password_hash")?,
        role,
    })
}
