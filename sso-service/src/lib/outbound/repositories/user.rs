use async_trait::async_trait;
use sqlx::PgPool;

use super::storage_error;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::UserRepository;

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    pass_hash: Vec<u8>,
    is_admin: bool,
}

impl TryFrom<UserRow> for User {
    type Error = StorageError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(row.email)
            .map_err(|e| StorageError::Internal(format!("Stored email is invalid: {}", e)))?;

        Ok(User {
            id: UserId(row.id),
            email,
            password_hash: row.pass_hash,
            is_admin: row.is_admin,
        })
    }
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(
        &self,
        email: &EmailAddress,
        password_hash: &[u8],
    ) -> Result<UserId, StorageError> {
        // Single statement: the UNIQUE constraint settles concurrent registrations
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (email, pass_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(email.as_str())
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map(UserId)
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                    return StorageError::Conflict;
                }
            }
            storage_error(e)
        })
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<User, StorageError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, pass_hash, is_admin
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.ok_or(StorageError::NotFound)?.try_into()
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, StorageError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT is_admin
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?
        .ok_or(StorageError::NotFound)
    }
}
