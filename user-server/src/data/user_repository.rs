use crate::domain::error::DomainError;
use crate::domain::user::User;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{error, info};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, email: &str, name: &str) -> Result<User, DomainError>;
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;
    async fn update(&self, id: i64, email: &str, name: &str) -> Result<Option<User>, DomainError>;
    /// Returns `false` when no row had this id.
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, email: &str) -> DomainError {
    let unique_email = e
        .as_database_error()
        .and_then(|db| db.constraint())
        .map(|c| c.contains("users_email"))
        == Some(true);

    if unique_email {
        DomainError::EmailAlreadyExists(email.to_string())
    } else {
        error!("failed to write user {}: {}", email, e);
        DomainError::Internal(format!("database error: {}", e))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, email: &str, name: &str) -> Result<User, DomainError> {
        let now = Utc::now().naive_utc();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING id, email, name, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(name)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, email))?;

        info!(user_id = user.id, email = %user.email, "user inserted");
        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching users: {}", e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to find user by id {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to check email {}: {}", email, e);
                DomainError::Internal(e.to_string())
            })
    }

    async fn update(&self, id: i64, email: &str, name: &str) -> Result<Option<User>, DomainError> {
        let now = Utc::now().naive_utc();
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = $1, name = $2, updated_at = $3
            WHERE id = $4
            RETURNING id, email, name, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(name)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, email))?;

        if user.is_some() {
            info!(user_id = id, "user row updated");
        }

        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete user {}: {}", id, e);
                DomainError::Internal(e.to_string())
            })?;

        Ok(deleted.rows_affected() > 0)
    }
}
