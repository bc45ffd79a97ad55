use std::fmt;
use std::str::FromStr;

use crate::domain::auth::errors::ValidationError;

/// User identity record.
///
/// Owned by the user directory; the service only borrows it for the duration
/// of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    /// Argon2 PHC string bytes, never the plaintext.
    pub password_hash: Vec<u8>,
    pub is_admin: bool,
}

/// User identifier assigned by the directory on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    /// Validate a user identifier received from a caller.
    ///
    /// # Errors
    /// * `MissingUserId` - Zero (the unset wire value) or negative
    pub fn new(raw: i64) -> Result<Self, ValidationError> {
        if raw > 0 {
            Ok(Self(raw))
        } else {
            Err(ValidationError::MissingUserId)
        }
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Application identifier, the audience a token is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AppId(pub i32);

impl AppId {
    /// Validate an application identifier received from a caller.
    ///
    /// # Errors
    /// * `MissingAppId` - Zero (the unset wire value) or negative
    pub fn new(raw: i32) -> Result<Self, ValidationError> {
        if raw > 0 {
            Ok(Self(raw))
        } else {
            Err(ValidationError::MissingAppId)
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidEmail` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, ValidationError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected email address");
                ValidationError::InvalidEmail
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password as supplied by the caller.
///
/// Never logged: `Debug` is redacted and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// # Errors
    /// * `EmptyPassword` - Password is an empty string
    pub fn new(password: String) -> Result<Self, ValidationError> {
        if password.is_empty() {
            Err(ValidationError::EmptyPassword)
        } else {
            Ok(Self(password))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Tenant that tokens are issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub id: AppId,
    pub name: String,
    pub secret: AppSecret,
}

/// Per-application signing secret. Only ever used as key material.
#[derive(Clone, PartialEq, Eq)]
pub struct AppSecret(String);

impl AppSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for AppSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppSecret(***)")
    }
}

/// Signed identity token (compact JWT).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityToken(String);

impl IdentityToken {
    pub fn new(token: String) -> Self {
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Command to log a user into an application.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: Password,
    pub app_id: AppId,
}

impl LoginCommand {
    pub fn new(email: EmailAddress, password: Password, app_id: AppId) -> Self {
        Self {
            email,
            password,
            app_id,
        }
    }

    /// Validate raw transport fields into a command.
    ///
    /// # Errors
    /// * `InvalidEmail`, `EmptyPassword`, `MissingAppId`
    pub fn parse(email: String, password: String, app_id: i32) -> Result<Self, ValidationError> {
        Ok(Self::new(
            EmailAddress::new(email)?,
            Password::new(password)?,
            AppId::new(app_id)?,
        ))
    }
}

/// Command to register a new user.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterCommand {
    pub fn new(email: EmailAddress, password: Password) -> Self {
        Self { email, password }
    }

    /// Validate raw transport fields into a command.
    ///
    /// # Errors
    /// * `InvalidEmail`, `EmptyPassword`
    pub fn parse(email: String, password: String) -> Result<Self, ValidationError> {
        Ok(Self::new(EmailAddress::new(email)?, Password::new(password)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("a@example.com".to_string()).is_ok());
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(ValidationError::InvalidEmail)
        ));
        assert!(matches!(
            EmailAddress::new(String::new()),
            Err(ValidationError::InvalidEmail)
        ));
    }

    #[test]
    fn test_invalid_email_message_has_no_parser_detail() {
        let err = EmailAddress::new("not-an-email".to_string()).unwrap_err();

        assert_eq!(err, ValidationError::InvalidEmail);
        assert_eq!(err.to_string(), "email is invalid");
    }

    #[test]
    fn test_identifiers_reject_unset_values() {
        assert_eq!(UserId::new(0), Err(ValidationError::MissingUserId));
        assert_eq!(UserId::new(-3), Err(ValidationError::MissingUserId));
        assert_eq!(UserId::new(7), Ok(UserId(7)));

        assert_eq!(AppId::new(0), Err(ValidationError::MissingAppId));
        assert_eq!(AppId::new(1), Ok(AppId(1)));
    }

    #[test]
    fn test_password_rejects_empty_and_redacts() {
        assert_eq!(Password::new(String::new()), Err(ValidationError::EmptyPassword));

        let password = Password::new("hunter2".to_string()).unwrap();
        assert_eq!(password.expose(), "hunter2");
        assert!(!format!("{:?}", password).contains("hunter2"));
    }

    #[test]
    fn test_app_secret_redacted() {
        let application = Application {
            id: AppId(1),
            name: "test".to_string(),
            secret: AppSecret::new("test-secret"),
        };

        assert!(!format!("{:?}", application).contains("test-secret"));
    }

    #[test]
    fn test_login_command_parse_checks_every_field() {
        assert!(matches!(
            LoginCommand::parse("bad".to_string(), "pw".to_string(), 1),
            Err(ValidationError::InvalidEmail)
        ));
        assert_eq!(
            LoginCommand::parse("a@example.com".to_string(), String::new(), 1).unwrap_err(),
            ValidationError::EmptyPassword
        );
        assert_eq!(
            LoginCommand::parse("a@example.com".to_string(), "pw".to_string(), 0).unwrap_err(),
            ValidationError::MissingAppId
        );
        assert!(LoginCommand::parse("a@example.com".to_string(), "pw".to_string(), 1).is_ok());
    }
}
