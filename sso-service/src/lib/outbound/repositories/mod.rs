pub mod application;
pub mod in_memory;
pub mod user;

pub use application::PostgresApplicationRepository;
pub use in_memory::InMemoryApplicationRepository;
pub use in_memory::InMemoryUserRepository;
pub use user::PostgresUserRepository;

use crate::domain::auth::errors::StorageError;

/// Classify a sqlx failure for the storage ports.
pub(crate) fn storage_error(error: sqlx::Error) -> StorageError {
    match &error {
        sqlx::Error::RowNotFound => StorageError::NotFound,
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::WorkerCrashed => StorageError::Unavailable(error.to_string()),
        _ => StorageError::Internal(error.to_string()),
    }
}
