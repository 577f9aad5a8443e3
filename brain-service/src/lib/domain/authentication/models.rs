use std::fmt;

use crate::domain::authentication::errors::AuthFailure;
use crate::domain::user::models::UserId;

/// Resolved caller identity, attached to a request after authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
}

/// Username and password as presented at signin.
///
/// Kept as raw strings: a value that would fail signup validation simply
/// cannot match a stored user.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// How a caller proves who they are.
pub enum Strategy {
    /// Username and password, checked against the stored hash.
    Credentials(Credentials),
    /// Previously issued bearer token.
    Bearer(String),
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Credentials(_) => "credentials",
            Strategy::Bearer(_) => "bearer",
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively. Anything else, including an
/// empty token, is rejected before any verification is attempted.
pub fn bearer_token(authorization: Option<&str>) -> Result<&str, AuthFailure> {
    let header = authorization.ok_or(AuthFailure::MissingHeader)?;

    let (scheme, token) = header
        .trim()
        .split_once(' ')
        .ok_or(AuthFailure::MalformedHeader)?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer")
        || token.is_empty()
        || token.contains(char::is_whitespace)
    {
        return Err(AuthFailure::MalformedHeader);
    }

    Ok(token)
}
