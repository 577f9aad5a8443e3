use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::share::errors::ShareError;
use crate::domain::user::models::UserId;

/// Opaque, unguessable share link token.
///
/// Possessing the token is the authorization; no identity is involved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShareToken(String);

impl ShareToken {
    /// Generate a fresh random token.
    ///
    /// # Errors
    /// * `TokenGenerationFailed` - The OS random source failed
    pub fn generate() -> Result<Self, ShareError> {
        auth::capability::generate_token()
            .map(Self)
            .map_err(|e| ShareError::TokenGenerationFailed(e.to_string()))
    }

    /// Accept a token presented by a caller.
    ///
    /// # Returns
    /// None when the string cannot be a token this service generated
    pub fn parse(token: &str) -> Option<Self> {
        auth::capability::is_well_formed(token).then(|| Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Binding of a share token to the collection owner.
///
/// At most one exists per owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareCapability {
    pub token: ShareToken,
    pub owner: UserId,
    pub created_at: DateTime<Utc>,
}
