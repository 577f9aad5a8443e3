use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::content::errors::ContentError;
use crate::domain::content::models::Content;
use crate::domain::content::models::ContentCommand;
use crate::domain::content::models::ContentId;
use crate::domain::content::models::ContentKind;
use crate::domain::content::models::Link;
use crate::domain::content::models::Tag;
use crate::domain::content::models::Title;
use crate::domain::content::ports::ContentRepository;
use crate::domain::user::models::UserId;

pub struct PostgresContentRepository {
    pool: PgPool,
}

impl PostgresContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_content(row: &PgRow) -> Result<Content, ContentError> {
        let title: String = row.try_get("title").map_err(database_error)?;
        let link: String = row.try_get("link").map_err(database_error)?;
        let kind: String = row.try_get("kind").map_err(database_error)?;
        let tags: Vec<String> = row.try_get("tags").map_err(database_error)?;

        Ok(Content {
            id: ContentId(row.try_get("id").map_err(database_error)?),
            owner: UserId(row.try_get("owner_id").map_err(database_error)?),
            title: Title::new(title)?,
            link: Link::new(&link)?,
            kind: kind.parse()?,
            tags: tags
                .into_iter()
                .map(Tag::new)
                .collect::<Result<Vec<_>, _>>()?,
            created_at: row.try_get("created_at").map_err(database_error)?,
        })
    }
}

fn database_error(e: sqlx::Error) -> ContentError {
    ContentError::DatabaseError(e.to_string())
}

fn tag_strings(tags: &[Tag]) -> Vec<String> {
    tags.iter().map(|tag| tag.as_str().to_string()).collect()
}

#[async_trait]
impl ContentRepository for PostgresContentRepository {
    async fn create(&self, content: Content) -> Result<Content, ContentError> {
        sqlx::query(
            r#"
            INSERT INTO contents (id, owner_id, title, link, kind, tags, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(content.id.0)
        .bind(content.owner.0)
        .bind(content.title.as_str())
        .bind(content.link.as_str())
        .bind(content.kind.as_str())
        .bind(tag_strings(&content.tags))
        .bind(content.created_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(content)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Content>, ContentError> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, title, link, kind, tags, created_at
            FROM contents
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(Self::row_to_content).collect()
    }

    async fn update_owned(
        &self,
        owner: &UserId,
        id: &ContentId,
        command: ContentCommand,
    ) -> Result<Option<Content>, ContentError> {
        let row = sqlx::query(
            r#"
            UPDATE contents
            SET title = $3, link = $4, kind = $5, tags = $6
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, title, link, kind, tags, created_at
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .bind(command.title.as_str())
        .bind(command.link.as_str())
        .bind(command.kind.as_str())
        .bind(tag_strings(&command.tags))
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(Self::row_to_content).transpose()
    }

    async fn delete_owned(&self, owner: &UserId, id: &ContentId) -> Result<bool, ContentError> {
        let result = sqlx::query(
            r#"
            DELETE FROM contents
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The CHECK constraint on contents.kind must accept every variant
    #[test]
    fn test_kind_column_values() {
        let stored: Vec<&str> = [
            ContentKind::Image,
            ContentKind::Video,
            ContentKind::Article,
            ContentKind::Audio,
        ]
        .iter()
        .map(ContentKind::as_str)
        .collect();

        let migration = include_str!("../../../../migrations/20240101000002_create_contents.sql");
        for value in stored {
            assert!(migration.contains(&format!("'{value}'")), "{value}");
        }
    }
}
