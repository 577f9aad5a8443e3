use auth::TokenError;
use thiserror::Error;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::UserId;

/// Why an authentication attempt was rejected.
///
/// The reason is for logs only; callers outside the service see a single
/// generic "unauthorized" outcome whatever the variant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("incorrect username")]
    UnknownUsername,

    #[error("incorrect password")]
    IncorrectPassword,

    #[error("missing authorization header")]
    MissingHeader,

    #[error("authorization header is not of the form 'Bearer <token>'")]
    MalformedHeader,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] TokenError),

    #[error("token subject is not a user id")]
    InvalidSubject,

    #[error("token subject no longer exists: {0}")]
    UnknownSubject(UserId),
}

/// Error for authentication operations.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Authentication rejected: {0}")]
    Rejected(#[from] AuthFailure),

    #[error("Password verification failed: {0}")]
    PasswordError(String),

    #[error("Token issuance failed: {0}")]
    TokenError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        AuthError::DatabaseError(err.to_string())
    }
}
