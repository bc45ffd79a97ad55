use thiserror::Error;

/// Malformed input, rejected before any storage call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("email is invalid")]
    InvalidEmail,

    #[error("password is required")]
    EmptyPassword,

    #[error("app id is required")]
    MissingAppId,

    #[error("user id is required")]
    MissingUserId,
}

/// Failure reported by a storage port.
///
/// Classified into an [`AuthError`] exactly once, inside the service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Record already exists")]
    Conflict,

    #[error("Record not found")]
    NotFound,

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage error: {0}")]
    Internal(String),
}

/// Error for token issuing and verification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Signing key is unusable")]
    UnusableKey,

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),
}

/// Top-level error for all authentication operations.
///
/// Messages are safe to show to callers: `Internal` never carries the
/// underlying cause, which is logged where it is classified.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Unknown email and wrong password alike.
    #[error("invalid creds")]
    CredentialsInvalid,

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("app not found")]
    ApplicationNotFound,

    #[error("user not found")]
    UserNotFound,

    #[error("internal error")]
    Internal,
}
