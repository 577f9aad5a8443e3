//! Process-local repositories.
//!
//! Used by `database.backend = "memory"` and by the test suites. Each
//! repository guards its state with a single lock so that multi-index
//! updates are atomic.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::content::errors::ContentError;
use crate::domain::content::models::Content;
use crate::domain::content::models::ContentCommand;
use crate::domain::content::models::ContentId;
use crate::domain::content::ports::ContentRepository;
use crate::domain::share::errors::ShareError;
use crate::domain::share::models::ShareCapability;
use crate::domain::share::models::ShareToken;
use crate::domain::share::ports::ShareRepository;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(Default)]
struct UserTables {
    by_id: HashMap<UserId, User>,
    by_username: HashMap<Username, UserId>,
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    tables: RwLock<UserTables>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut tables = self.tables.write().await;

        if tables.by_username.contains_key(&user.username) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }

        tables.by_username.insert(user.username.clone(), user.id);
        tables.by_id.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.tables.read().await.by_id.get(id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let tables = self.tables.read().await;

        Ok(tables
            .by_username
            .get(username)
            .and_then(|id| tables.by_id.get(id))
            .cloned())
    }
}

#[derive(Default)]
struct ShareTables {
    by_owner: HashMap<UserId, ShareCapability>,
    by_token: HashMap<ShareToken, UserId>,
}

#[derive(Default)]
pub struct InMemoryShareRepository {
    tables: RwLock<ShareTables>,
}

impl InMemoryShareRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live share capabilities.
    pub async fn len(&self) -> usize {
        self.tables.read().await.by_owner.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ShareRepository for InMemoryShareRepository {
    async fn find_by_owner(&self, owner: &UserId) -> Result<Option<ShareCapability>, ShareError> {
        Ok(self.tables.read().await.by_owner.get(owner).cloned())
    }

    async fn create(&self, capability: ShareCapability) -> Result<ShareCapability, ShareError> {
        let mut tables = self.tables.write().await;

        if let Some(previous) = tables.by_owner.insert(capability.owner, capability.clone()) {
            tables.by_token.remove(&previous.token);
        }
        tables
            .by_token
            .insert(capability.token.clone(), capability.owner);

        Ok(capability)
    }

    async fn delete_by_owner(&self, owner: &UserId) -> Result<(), ShareError> {
        let mut tables = self.tables.write().await;

        if let Some(previous) = tables.by_owner.remove(owner) {
            tables.by_token.remove(&previous.token);
        }

        Ok(())
    }

    async fn find_by_token(
        &self,
        token: &ShareToken,
    ) -> Result<Option<ShareCapability>, ShareError> {
        let tables = self.tables.read().await;

        Ok(tables
            .by_token
            .get(token)
            .and_then(|owner| tables.by_owner.get(owner))
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryContentRepository {
    contents: RwLock<HashMap<ContentId, Content>>,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn create(&self, content: Content) -> Result<Content, ContentError> {
        self.contents
            .write()
            .await
            .insert(content.id, content.clone());

        Ok(content)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Content>, ContentError> {
        let mut owned: Vec<Content> = self
            .contents
            .read()
            .await
            .values()
            .filter(|content| content.owner == *owner)
            .cloned()
            .collect();

        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(owned)
    }

    async fn update_owned(
        &self,
        owner: &UserId,
        id: &ContentId,
        command: ContentCommand,
    ) -> Result<Option<Content>, ContentError> {
        let mut contents = self.contents.write().await;

        match contents.get_mut(id) {
            Some(content) if content.owner == *owner => {
                content.title = command.title;
                content.link = command.link;
                content.kind = command.kind;
                content.tags = command.tags;
                Ok(Some(content.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_owned(&self, owner: &UserId, id: &ContentId) -> Result<bool, ContentError> {
        let mut contents = self.contents.write().await;

        match contents.get(id) {
            Some(content) if content.owner == *owner => {
                contents.remove(id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
