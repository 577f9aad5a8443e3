use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::share::errors::ShareError;
use crate::domain::share::models::ShareCapability;
use crate::domain::share::models::ShareToken;
use crate::domain::share::ports::ShareRepository;
use crate::domain::user::models::UserId;

pub struct PostgresShareRepository {
    pool: PgPool,
}

impl PostgresShareRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_capability(row: &PgRow) -> Result<ShareCapability, ShareError> {
        let token: String = row.try_get("token").map_err(database_error)?;
        let token = ShareToken::parse(&token)
            .ok_or_else(|| ShareError::DatabaseError(format!("corrupt share token '{token}'")))?;

        Ok(ShareCapability {
            token,
            owner: UserId(row.try_get("owner_id").map_err(database_error)?),
            created_at: row.try_get("created_at").map_err(database_error)?,
        })
    }
}

fn database_error(e: sqlx::Error) -> ShareError {
    ShareError::DatabaseError(e.to_string())
}

#[async_trait]
impl ShareRepository for PostgresShareRepository {
    async fn find_by_owner(&self, owner: &UserId) -> Result<Option<ShareCapability>, ShareError> {
        let row = sqlx::query(
            r#"
            SELECT owner_id, token, created_at
            FROM share_links
            WHERE owner_id = $1
            "#,
        )
        .bind(owner.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(Self::row_to_capability).transpose()
    }

    async fn create(&self, capability: ShareCapability) -> Result<ShareCapability, ShareError> {
        // owner_id is the primary key, so the upsert keeps one row per owner
        let row = sqlx::query(
            r#"
            INSERT INTO share_links (owner_id, token, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (owner_id)
            DO UPDATE SET token = EXCLUDED.token, created_at = EXCLUDED.created_at
            RETURNING owner_id, token, created_at
            "#,
        )
        .bind(capability.owner.0)
        .bind(capability.token.as_str())
        .bind(capability.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Self::row_to_capability(&row)
    }

    async fn delete_by_owner(&self, owner: &UserId) -> Result<(), ShareError> {
        sqlx::query(
            r#"
            DELETE FROM share_links
            WHERE owner_id = $1
            "#,
        )
        .bind(owner.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(())
    }

    async fn find_by_token(
        &self,
        token: &ShareToken,
    ) -> Result<Option<ShareCapability>, ShareError> {
        let row = sqlx::query(
            r#"
            SELECT owner_id, token, created_at
            FROM share_links
            WHERE token = $1
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(Self::row_to_capability).transpose()
    }
}
