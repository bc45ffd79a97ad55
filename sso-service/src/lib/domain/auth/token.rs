use auth::JwtError;
use auth::JwtHandler;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::auth::errors::TokenError;
use crate::domain::auth::models::AppSecret;
use crate::domain::auth::models::Application;
use crate::domain::auth::models::IdentityToken;
use crate::domain::auth::models::User;

/// Claim set carried by an identity token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject: the user identifier
    pub uid: i64,
    pub email: String,
    /// Audience: the application the token is scoped to
    pub app_id: i32,
    /// Expiration (Unix timestamp, seconds)
    pub exp: i64,
}

impl IdentityClaims {
    /// A token is no longer valid from its `exp` second onwards.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Builds and signs identity tokens.
///
/// Stateless: every application's secret keys its own HS256 handler, so
/// applications are independent trust domains.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenIssuer;

impl TokenIssuer {
    pub fn new() -> Self {
        Self
    }

    /// Sign a token for `user` scoped to `application`, valid for `ttl` from `now`.
    ///
    /// # Errors
    /// * `UnusableKey` - The application secret cannot key HS256
    /// * `Signing` - Encoding failed, or `now + ttl` is out of range
    pub fn issue(
        &self,
        user: &User,
        application: &Application,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<IdentityToken, TokenError> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Signing(format!("Lifetime out of range: {}", ttl)))?;

        let claims = IdentityClaims {
            uid: user.id.value(),
            email: user.email.as_str().to_string(),
            app_id: application.id.value(),
            exp: expires_at.timestamp(),
        };

        let handler = handler_for(&application.secret)?;
        handler
            .encode(&claims)
            .map(IdentityToken::new)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Check a token's signature under `secret` and its expiry against `now`.
    ///
    /// # Errors
    /// * `UnusableKey` - The secret cannot key HS256
    /// * `Invalid` - Malformed token or signed under another secret
    /// * `Expired` - `now` is at or past the `exp` claim
    pub fn verify(
        &self,
        token: &str,
        secret: &AppSecret,
        now: DateTime<Utc>,
    ) -> Result<IdentityClaims, TokenError> {
        let claims: IdentityClaims = handler_for(secret)?
            .decode_ignoring_expiry(token)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

fn handler_for(secret: &AppSecret) -> Result<JwtHandler, TokenError> {
    JwtHandler::new(secret.as_bytes()).map_err(|e| match e {
        JwtError::EmptyKey => TokenError::UnusableKey,
        other => TokenError::Signing(other.to_string()),
    })
}
