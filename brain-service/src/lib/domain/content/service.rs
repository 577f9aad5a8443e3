use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::ContentError;
use super::models::Content;
use super::models::ContentCommand;
use super::models::ContentId;
use super::ports::ContentRepository;
use super::ports::ContentServicePort;
use crate::domain::user::models::UserId;

pub struct ContentService<CR>
where
    CR: ContentRepository,
{
    content_repository: Arc<CR>,
}

impl<CR> ContentService<CR>
where
    CR: ContentRepository,
{
    pub fn new(content_repository: Arc<CR>) -> Self {
        Self { content_repository }
    }
}

#[async_trait]
impl<CR> ContentServicePort for ContentService<CR>
where
    CR: ContentRepository,
{
    async fn create_content(
        &self,
        owner: &UserId,
        command: ContentCommand,
    ) -> Result<Content, ContentError> {
        let content = Content {
            id: ContentId::new(),
            owner: *owner,
            title: command.title,
            link: command.link,
            kind: command.kind,
            tags: command.tags,
            created_at: Utc::now(),
        };

        let content = self.content_repository.create(content).await?;

        tracing::info!(content_id = %content.id, owner = %owner, "Content created");

        Ok(content)
    }

    async fn list_content(&self, owner: &UserId) -> Result<Vec<Content>, ContentError> {
        self.content_repository.list_by_owner(owner).await
    }

    async fn update_content(
        &self,
        caller: &UserId,
        id: &ContentId,
        command: ContentCommand,
    ) -> Result<Content, ContentError> {
        let content = self
            .content_repository
            .update_owned(caller, id, command)
            .await?
            .ok_or(ContentError::Forbidden(*id))?;

        tracing::info!(content_id = %id, owner = %caller, "Content updated");

        Ok(content)
    }

    async fn delete_content(&self, caller: &UserId, id: &ContentId) -> Result<(), ContentError> {
        if !self.content_repository.delete_owned(caller, id).await? {
            return Err(ContentError::Forbidden(*id));
        }

        tracing::info!(content_id = %id, owner = %caller, "Content deleted");

        Ok(())
    }
}
