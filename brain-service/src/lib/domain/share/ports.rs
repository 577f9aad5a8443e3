use async_trait::async_trait;

use crate::domain::share::errors::ShareError;
use crate::domain::share::models::ShareCapability;
use crate::domain::share::models::ShareToken;
use crate::domain::user::models::UserId;

/// Port for share link operations.
#[async_trait]
pub trait ShareServicePort: Send + Sync + 'static {
    /// Turn sharing on for an owner.
    ///
    /// Re-enabling replaces the existing token; the old one stops resolving.
    ///
    /// # Returns
    /// The owner's (new) share token
    ///
    /// # Errors
    /// * `TokenGenerationFailed` - Random source failed
    /// * `DatabaseError` - Database operation failed
    async fn enable_sharing(&self, owner: &UserId) -> Result<ShareToken, ShareError>;

    /// Turn sharing off. Succeeds when sharing was already off.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn disable_sharing(&self, owner: &UserId) -> Result<(), ShareError>;

    /// Resolve a public share token to the owner of the shared collection.
    ///
    /// # Errors
    /// * `NotFound` - Token is unknown, revoked, or not a token at all
    /// * `DatabaseError` - Database operation failed
    async fn resolve_share(&self, token: &str) -> Result<UserId, ShareError>;

    /// Current share token for an owner, if sharing is on.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn share_status(&self, owner: &UserId) -> Result<Option<ShareToken>, ShareError>;
}

/// Persistence operations for share capabilities.
#[async_trait]
pub trait ShareRepository: Send + Sync + 'static {
    /// Retrieve the capability owned by a user.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_owner(&self, owner: &UserId) -> Result<Option<ShareCapability>, ShareError>;

    /// Store a capability, atomically replacing any existing one for the same owner.
    ///
    /// Implementations must do this as one storage operation so that
    /// concurrent calls for one owner still leave exactly one capability.
    ///
    /// # Returns
    /// The stored capability
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, capability: ShareCapability) -> Result<ShareCapability, ShareError>;

    /// Remove the capability owned by a user. Removing nothing is not an error.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_by_owner(&self, owner: &UserId) -> Result<(), ShareError>;

    /// Retrieve a capability by its token.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_token(&self, token: &ShareToken)
        -> Result<Option<ShareCapability>, ShareError>;
}
