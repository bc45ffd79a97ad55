//! Process-local repositories for tests and development runs.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::Application;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::ApplicationRepository;
use crate::domain::auth::ports::UserRepository;

#[derive(Default)]
struct UserTable {
    next_id: i64,
    users: HashMap<UserId, User>,
    by_email: HashMap<String, UserId>,
}

/// User directory held in memory. Identifiers are assigned from 1.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the administrator flag of an existing user.
    pub async fn grant_admin(&self, user_id: UserId) -> Result<(), StorageError> {
        let mut table = self.table.write().await;
        let user = table.users.get_mut(&user_id).ok_or(StorageError::NotFound)?;
        user.is_admin = true;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(
        &self,
        email: &EmailAddress,
        password_hash: &[u8],
    ) -> Result<UserId, StorageError> {
        // Check and insert under one write lock
        let mut table = self.table.write().await;
        if table.by_email.contains_key(email.as_str()) {
            return Err(StorageError::Conflict);
        }

        table.next_id += 1;
        let id = UserId(table.next_id);
        table.by_email.insert(email.as_str().to_string(), id);
        table.users.insert(
            id,
            User {
                id,
                email: email.clone(),
                password_hash: password_hash.to_vec(),
                is_admin: false,
            },
        );

        Ok(id)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<User, StorageError> {
        let table = self.table.read().await;
        table
            .by_email
            .get(email.as_str())
            .and_then(|id| table.users.get(id))
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, StorageError> {
        let table = self.table.read().await;
        table
            .users
            .get(&user_id)
            .map(|user| user.is_admin)
            .ok_or(StorageError::NotFound)
    }
}

/// Application registry held in memory.
#[derive(Default)]
pub struct InMemoryApplicationRepository {
    applications: RwLock<HashMap<AppId, Application>>,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_applications(applications: impl IntoIterator<Item = Application>) -> Self {
        let applications = applications
            .into_iter()
            .map(|application| (application.id, application))
            .collect();

        Self {
            applications: RwLock::new(applications),
        }
    }

    pub async fn insert(&self, application: Application) {
        self.applications
            .write()
            .await
            .insert(application.id, application);
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn find_by_id(&self, app_id: AppId) -> Result<Application, StorageError> {
        self.applications
            .read()
            .await
            .get(&app_id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }
}
