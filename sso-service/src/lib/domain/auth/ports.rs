use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::Application;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::IdentityToken;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;

/// Port for authentication domain service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a token scoped to one application.
    ///
    /// # Arguments
    /// * `command` - Validated email, password and application id
    ///
    /// # Returns
    /// Signed identity token
    ///
    /// # Errors
    /// * `CredentialsInvalid` - Unknown email or wrong password (indistinguishable)
    /// * `ApplicationNotFound` - No application with this id
    /// * `Internal` - Storage or signing failure
    async fn login(&self, command: LoginCommand) -> Result<IdentityToken, AuthError>;

    /// Register a new user with a hashed password.
    ///
    /// # Arguments
    /// * `command` - Validated email and password
    ///
    /// # Returns
    /// Identifier assigned by the user directory
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered
    /// * `Internal` - Hashing or storage failure
    async fn register_new_user(&self, command: RegisterCommand) -> Result<UserId, AuthError>;

    /// Tell whether a user holds the administrator flag.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this id
    /// * `Internal` - Storage failure
    async fn is_admin(&self, user_id: UserId) -> Result<bool, AuthError>;
}

/// Persistence operations for users (the user directory).
///
/// Implementations must enforce email uniqueness atomically: of two
/// concurrent `create_user` calls for one email exactly one succeeds.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `Conflict` - Email is already registered
    /// * `Unavailable` / `Internal` - Storage failure
    async fn create_user(
        &self,
        email: &EmailAddress,
        password_hash: &[u8],
    ) -> Result<UserId, StorageError>;

    /// Retrieve a user by email address.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `Unavailable` / `Internal` - Storage failure
    async fn find_by_email(&self, email: &EmailAddress) -> Result<User, StorageError>;

    /// Read the administrator flag of a user.
    ///
    /// # Errors
    /// * `NotFound` - No user with this id
    /// * `Unavailable` / `Internal` - Storage failure
    async fn is_admin(&self, user_id: UserId) -> Result<bool, StorageError>;
}

/// Lookup of applications and their signing secrets (the application registry).
#[async_trait]
pub trait ApplicationRepository: Send + Sync + 'static {
    /// Retrieve an application by identifier.
    ///
    /// # Errors
    /// * `NotFound` - No application with this id
    /// * `Unavailable` / `Internal` - Storage failure
    async fn find_by_id(&self, app_id: AppId) -> Result<Application, StorageError>;
}
