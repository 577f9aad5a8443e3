use async_trait::async_trait;

use crate::domain::content::errors::ContentError;
use crate::domain::content::models::Content;
use crate::domain::content::models::ContentCommand;
use crate::domain::content::models::ContentId;
use crate::domain::user::models::UserId;

/// Port for content operations. Every call is scoped to the caller.
#[async_trait]
pub trait ContentServicePort: Send + Sync + 'static {
    /// Save a new content item owned by the caller.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_content(
        &self,
        owner: &UserId,
        command: ContentCommand,
    ) -> Result<Content, ContentError>;

    /// List the caller's content, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_content(&self, owner: &UserId) -> Result<Vec<Content>, ContentError>;

    /// Replace the fields of a content item owned by the caller.
    ///
    /// # Errors
    /// * `Forbidden` - Item does not exist or is owned by someone else
    /// * `DatabaseError` - Database operation failed
    async fn update_content(
        &self,
        caller: &UserId,
        id: &ContentId,
        command: ContentCommand,
    ) -> Result<Content, ContentError>;

    /// Delete a content item owned by the caller.
    ///
    /// # Errors
    /// * `Forbidden` - Item does not exist or is owned by someone else
    /// * `DatabaseError` - Database operation failed
    async fn delete_content(&self, caller: &UserId, id: &ContentId) -> Result<(), ContentError>;
}

/// Persistence operations for content.
///
/// The owner check is part of the storage statement, so the check and the
/// write cannot be separated by a concurrent change.
#[async_trait]
pub trait ContentRepository: Send + Sync + 'static {
    async fn create(&self, content: Content) -> Result<Content, ContentError>;

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Content>, ContentError>;

    /// # Returns
    /// The updated item, or None when no item with this id belongs to `owner`
    async fn update_owned(
        &self,
        owner: &UserId,
        id: &ContentId,
        command: ContentCommand,
    ) -> Result<Option<Content>, ContentError>;

    /// # Returns
    /// Whether an item was deleted
    async fn delete_owned(&self, owner: &UserId, id: &ContentId) -> Result<bool, ContentError>;
}
