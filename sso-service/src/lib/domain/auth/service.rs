use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordError;
use auth::PasswordHasher;
use chrono::Duration;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::IdentityToken;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::Password;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::ApplicationRepository;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::UserRepository;
use crate::domain::auth::token::TokenIssuer;

/// Domain service implementation for authentication operations.
///
/// Concrete implementation of AuthServicePort with dependency injection.
/// Holds no per-call state, so one instance serves all requests concurrently.
pub struct AuthService<UR, AR>
where
    UR: UserRepository,
    AR: ApplicationRepository,
{
    users: Arc<UR>,
    applications: Arc<AR>,
    token_issuer: TokenIssuer,
    password_hasher: PasswordHasher,
    token_ttl: Duration,
    /// Verified against when the email is unknown, so both credential
    /// failures cost one Argon2 run.
    dummy_hash: Arc<Vec<u8>>,
}

impl<UR, AR> AuthService<UR, AR>
where
    UR: UserRepository,
    AR: ApplicationRepository,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User directory implementation
    /// * `applications` - Application registry implementation
    /// * `password_hasher` - Argon2 hasher with the configured cost
    /// * `token_ttl` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `HashingFailed` - The dummy hash for unknown emails cannot be computed
    pub fn new(
        users: Arc<UR>,
        applications: Arc<AR>,
        password_hasher: PasswordHasher,
        token_ttl: Duration,
    ) -> Result<Self, PasswordError> {
        let dummy_hash = password_hasher.hash("sso-dummy-password").map_err(|e| {
            tracing::error!(error = %e, "Failed to compute dummy password hash");
            e
        })?;

        Ok(Self {
            users,
            applications,
            token_issuer: TokenIssuer::new(),
            password_hasher,
            token_ttl,
            dummy_hash: Arc::new(dummy_hash),
        })
    }

    async fn hash_password(&self, password: Password) -> Result<Vec<u8>, AuthError> {
        let hasher = self.password_hasher.clone();

        tokio::task::spawn_blocking(move || hasher.hash(password.expose()))
            .await
            .map_err(|e| internal("password hashing task failed", e))?
            .map_err(|e| internal("failed to hash password", e))
    }

    async fn verify_password(&self, password: Password, hash: Vec<u8>) -> Result<bool, AuthError> {
        let hasher = self.password_hasher.clone();

        tokio::task::spawn_blocking(move || hasher.verify(password.expose(), &hash))
            .await
            .map_err(|e| internal("password verification task failed", e))?
            .map_err(|e| internal("failed to verify password", e))
    }

    async fn burn_verification(&self, password: Password) {
        let hasher = self.password_hasher.clone();
        let dummy_hash = Arc::clone(&self.dummy_hash);

        let _ = tokio::task::spawn_blocking(move || hasher.verify(password.expose(), &dummy_hash))
            .await;
    }
}

fn internal(context: &str, error: impl std::fmt::Display) -> AuthError {
    tracing::error!(error = %error, "{}", context);
    AuthError::Internal
}

#[async_trait]
impl<UR, AR> AuthServicePort for AuthService<UR, AR>
where
    UR: UserRepository,
    AR: ApplicationRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<IdentityToken, AuthError> {
        let LoginCommand {
            email,
            password,
            app_id,
        } = command;
        tracing::info!(op = "auth.login", app_id = %app_id, "Logging in user");

        let user = match self.users.find_by_email(&email).await {
            Ok(user) => user,
            Err(StorageError::NotFound) => {
                self.burn_verification(password).await;
                tracing::warn!(op = "auth.login", "User not found");
                return Err(AuthError::CredentialsInvalid);
            }
            Err(e) => return Err(internal("failed to get user", e)),
        };

        if !self
            .verify_password(password, user.password_hash.clone())
            .await?
        {
            tracing::warn!(op = "auth.login", user_id = %user.id, "Invalid credentials");
            return Err(AuthError::CredentialsInvalid);
        }

        let application = match self.applications.find_by_id(app_id).await {
            Ok(application) => application,
            Err(StorageError::NotFound) => {
                tracing::warn!(op = "auth.login", app_id = %app_id, "Application not found");
                return Err(AuthError::ApplicationNotFound);
            }
            Err(e) => return Err(internal("failed to get application", e)),
        };

        let token = self
            .token_issuer
            .issue(&user, &application, self.token_ttl, Utc::now())
            .map_err(|e| internal("failed to generate token", e))?;

        tracing::info!(
            op = "auth.login",
            user_id = %user.id,
            app_id = %app_id,
            "User logged in successfully"
        );
        Ok(token)
    }

    async fn register_new_user(&self, command: RegisterCommand) -> Result<UserId, AuthError> {
        tracing::info!(op = "auth.register_new_user", "Registering user");

        let password_hash = self.hash_password(command.password).await?;

        match self.users.create_user(&command.email, &password_hash).await {
            Ok(user_id) => {
                tracing::info!(
                    op = "auth.register_new_user",
                    user_id = %user_id,
                    "User saved successfully"
                );
                Ok(user_id)
            }
            Err(StorageError::Conflict) => {
                tracing::warn!(op = "auth.register_new_user", "User already exists");
                Err(AuthError::UserAlreadyExists)
            }
            Err(e) => Err(internal("failed to save user", e)),
        }
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, AuthError> {
        match self.users.is_admin(user_id).await {
            Ok(is_admin) => {
                tracing::info!(op = "auth.is_admin", user_id = %user_id, is_admin, "Checked admin flag");
                Ok(is_admin)
            }
            Err(StorageError::NotFound) => {
                tracing::warn!(op = "auth.is_admin", user_id = %user_id, "User not found");
                Err(AuthError::UserNotFound)
            }
            Err(e) => Err(internal("failed to determine admin flag", e)),
        }
    }
}
