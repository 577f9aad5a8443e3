use async_trait::async_trait;
use auth::AuthenticationResult;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::Credentials;
use crate::domain::authentication::models::Identity;
use crate::domain::authentication::models::Strategy;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;

/// Port for registration and authentication.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated username and plaintext password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `HashingFailed` - Password could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn signup(&self, command: SignupCommand) -> Result<User, UserError>;

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    /// * `Rejected` - Unknown username or wrong password
    /// * `TokenError` - Token could not be issued
    /// * `DatabaseError` - Database operation failed
    async fn signin(&self, credentials: Credentials) -> Result<AuthenticationResult, AuthError>;

    /// Resolve an identity with the given strategy.
    ///
    /// # Errors
    /// * `Rejected` - Strategy-specific verification failed
    /// * `PasswordError` - Stored hash is unusable
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, strategy: Strategy) -> Result<Identity, AuthError>;

    /// Resolve the identity behind an `Authorization` header value.
    ///
    /// # Errors
    /// * `Rejected` - Header absent or malformed, or the bearer token fails
    /// * `DatabaseError` - Database operation failed
    async fn authenticate_request(&self, authorization: Option<&str>)
        -> Result<Identity, AuthError>;
}
