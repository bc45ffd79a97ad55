use tonic::Status;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::ValidationError;

pub mod is_admin;
pub mod login;
pub mod register;

impl From<ValidationError> for Status {
    fn from(err: ValidationError) -> Self {
        Status::invalid_argument(err.to_string())
    }
}

impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(e) => e.into(),
            AuthError::CredentialsInvalid => Status::invalid_argument(err.to_string()),
            AuthError::UserAlreadyExists => Status::already_exists(err.to_string()),
            AuthError::UserNotFound => Status::not_found(err.to_string()),
            // Login callers only ever see "internal error" for an unknown app
            AuthError::ApplicationNotFound | AuthError::Internal => {
                Status::internal(AuthError::Internal.to_string())
            }
        }
    }
}
