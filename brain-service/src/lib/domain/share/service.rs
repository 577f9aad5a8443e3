use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::ShareError;
use super::models::ShareCapability;
use super::models::ShareToken;
use super::ports::ShareRepository;
use super::ports::ShareServicePort;
use crate::domain::user::models::UserId;

/// Concrete implementation of ShareServicePort.
///
/// Every operation is a single repository call; the one-link-per-owner rule
/// lives in the repository.
pub struct ShareService<SR>
where
    SR: ShareRepository,
{
    share_repository: Arc<SR>,
}

impl<SR> ShareService<SR>
where
    SR: ShareRepository,
{
    pub fn new(share_repository: Arc<SR>) -> Self {
        Self { share_repository }
    }
}

#[async_trait]
impl<SR> ShareServicePort for ShareService<SR>
where
    SR: ShareRepository,
{
    async fn enable_sharing(&self, owner: &UserId) -> Result<ShareToken, ShareError> {
        let capability = ShareCapability {
            token: ShareToken::generate()?,
            owner: *owner,
            created_at: Utc::now(),
        };

        let stored = self.share_repository.create(capability).await?;

        tracing::info!(owner = %owner, "Sharing enabled");

        Ok(stored.token)
    }

    async fn disable_sharing(&self, owner: &UserId) -> Result<(), ShareError> {
        self.share_repository.delete_by_owner(owner).await?;

        tracing::info!(owner = %owner, "Sharing disabled");

        Ok(())
    }

    async fn resolve_share(&self, token: &str) -> Result<UserId, ShareError> {
        let token = ShareToken::parse(token).ok_or(ShareError::NotFound)?;

        self.share_repository
            .find_by_token(&token)
            .await?
            .map(|capability| capability.owner)
            .ok_or(ShareError::NotFound)
    }

    async fn share_status(&self, owner: &UserId) -> Result<Option<ShareToken>, ShareError> {
        Ok(self
            .share_repository
            .find_by_owner(owner)
            .await?
            .map(|capability| capability.token))
    }
}
