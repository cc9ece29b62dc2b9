use crate::domain::{
    care::entity::RecordCounts,
    shared::errors::DomainError,
    user::{entity::User, repository::UserRepository},
};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, password_hash, is_admin, created_at";

pub struct SqlxUserRepository {
    pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        info!("Initializing SqlxUserRepository with connection pool");
        Self { pool }
    }
}

/// Unique-username violations become a validation error instead of a 500.
fn map_write_error(err: sqlx::Error, username: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return DomainError::validation(format!("User {} is already registered.", username));
        }
    }
    error!("User write failed: {}", err);
    DomainError::InfrastructureError(format!("Failed to save user: {}", err))
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id, username = %user.username))]
    async fn create(&self, user: &User) -> Result<User, DomainError> {
        let created = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, username, password_hash, is_admin, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.is_admin)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user.username))?;

        debug!("Inserted user row");
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: &User) -> Result<User, DomainError> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET username = $2, password_hash = $3, is_admin = $4
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.is_admin)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user.username))?
        .ok_or_else(|| DomainError::NotFound(format!("User id {} doesn't exist.", user.id)))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn authored_counts(&self, author_id: Uuid) -> Result<RecordCounts, DomainError> {
        let (anc, ldr, pnc) = sqlx::query_as::<_, (i64, i64, i64)>(
            "SELECT
                (SELECT COUNT(*) FROM anc_records WHERE author_id = $1),
                (SELECT COUNT(*) FROM ldr_notes WHERE author_id = $1),
                (SELECT COUNT(*) FROM pnc_notes WHERE author_id = $1)",
        )
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(RecordCounts { anc, ldr, pnc })
    }
}
