use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtHandler;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password hashing and JWT handling.
///
/// Built once at startup and shared read-only; holds no mutable state.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of a successful token issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
    /// Instant after which the token is rejected
    pub expires_at: DateTime<Utc>,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `token_ttl` - Lifetime of issued tokens
    /// * `password_hasher` - Hasher configured with the deployment's cost
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(jwt_secret: &[u8], token_ttl: Duration, password_hasher: PasswordHasher) -> Self {
        Self {
            password_hasher,
            jwt_handler: JwtHandler::new(jwt_secret, token_ttl),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Returns
    /// `false` on mismatch
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is malformed
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a bearer token for a subject, valid from now.
    ///
    /// # Errors
    /// * `TokenError::EncodingFailed` - Token generation failed
    pub fn issue_token(&self, subject: impl ToString) -> Result<AuthenticationResult, TokenError> {
        self.issue_token_at(subject, Utc::now())
    }

    /// Issue a bearer token for a subject as of `now`.
    pub fn issue_token_at(
        &self,
        subject: impl ToString,
        now: DateTime<Utc>,
    ) -> Result<AuthenticationResult, TokenError> {
        let claims = Claims::for_subject(subject, now, self.jwt_handler.ttl())?;
        let access_token = self.jwt_handler.encode(&claims)?;
        let expires_at = claims
            .expires_at()
            .ok_or_else(|| TokenError::EncodingFailed("expiration out of range".to_string()))?;

        Ok(AuthenticationResult {
            access_token,
            expires_at,
        })
    }

    /// Validate and decode a bearer token.
    ///
    /// # Errors
    /// * `TokenError` - Token is malformed, forged or expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.jwt_handler.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::PasswordCost;

    fn authenticator() -> Authenticator {
        let hasher = PasswordHasher::with_cost(PasswordCost {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        Authenticator::new(b"test_secret_key_at_least_32_bytes!", Duration::hours(1), hasher)
    }

    #[test]
    fn test_password_round_trip() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        assert!(authenticator.verify_password("my_password", &hash).unwrap());
        assert!(!authenticator.verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_issue_and_validate_token() {
        let authenticator = authenticator();

        let result = authenticator
            .issue_token("user123")
            .expect("Failed to issue token");
        assert!(!result.access_token.is_empty());

        let claims = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.exp, result.expires_at.timestamp());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_stale_token_is_expired() {
        let authenticator = authenticator();

        let result = authenticator
            .issue_token_at("user123", Utc::now() - Duration::hours(3))
            .unwrap();

        assert_eq!(
            authenticator.validate_token(&result.access_token),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_issue_token_with_unrepresentable_expiry() {
        let hasher = PasswordHasher::with_cost(PasswordCost {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        let authenticator = Authenticator::new(
            b"test_secret_key_at_least_32_bytes!",
            Duration::days(365 * 1_000_000),
            hasher,
        );

        let result = authenticator.issue_token("user123");
        assert!(matches!(result, Err(TokenError::EncodingFailed(_))));
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = authenticator();

        let result = authenticator.validate_token("invalid.token.here");
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }
}
