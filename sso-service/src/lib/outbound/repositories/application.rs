use async_trait::async_trait;
use sqlx::PgPool;

use super::storage_error;
use crate::config::ApplicationConfig;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::AppSecret;
use crate::domain::auth::models::Application;
use crate::domain::auth::ports::ApplicationRepository;

#[derive(sqlx::FromRow)]
struct ApplicationRow {
    id: i32,
    name: String,
    secret: String,
}

impl From<ApplicationRow> for Application {
    fn from(row: ApplicationRow) -> Self {
        Self {
            id: AppId(row.id),
            name: row.name,
            secret: AppSecret::new(row.secret),
        }
    }
}

pub struct PostgresApplicationRepository {
    pool: PgPool,
}

impl PostgresApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an application, or update name and secret of an existing id.
    pub async fn register(&self, application: &ApplicationConfig) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO apps (id, name, secret)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name, secret = EXCLUDED.secret
            "#,
        )
        .bind(application.id)
        .bind(&application.name)
        .bind(&application.secret)
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => StorageError::Conflict,
            _ => storage_error(e),
        })?;

        Ok(())
    }
}

#[async_trait]
impl ApplicationRepository for PostgresApplicationRepository {
    async fn find_by_id(&self, app_id: AppId) -> Result<Application, StorageError> {
        sqlx::query_as::<_, ApplicationRow>(
            r#"
            SELECT id, name, secret
            FROM apps
            WHERE id = $1
            "#,
        )
        .bind(app_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?
        .map(Application::from)
        .ok_or(StorageError::NotFound)
    }
}
