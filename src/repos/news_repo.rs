/*
 * Responsibility
 * - news テーブル向け SQLx 操作
 * - imageUrl は任意 (NULL 可)
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoResult;
use crate::repos::store::{Resource, ResourceStore};
use crate::services::policy::ResourceKind;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NewsRow {
    #[sqlx(rename = "newsId")]
    pub news_id: i64,

    #[sqlx(rename = "authorId")]
    pub author_id: Uuid,

    pub title: String,
    pub news: String,

    #[sqlx(rename = "imageUrl")]
    pub image_url: Option<String>,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsDraft {
    pub title: String,
    pub news: String,
    pub image_url: Option<String>,
}

impl Resource for NewsRow {
    type Draft = NewsDraft;

    const KIND: ResourceKind = ResourceKind::News;

    fn id(&self) -> i64 {
        self.news_id
    }

    fn author_id(&self) -> Uuid {
        self.author_id
    }

    fn materialize(id: i64, author_id: Uuid, draft: NewsDraft, now: DateTime<Utc>) -> Self {
        Self {
            news_id: id,
            author_id,
            title: draft.title,
            news: draft.news,
            image_url: draft.image_url,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: NewsDraft, now: DateTime<Utc>) {
        self.title = draft.title;
        self.news = draft.news;
        self.image_url = draft.image_url;
        self.updated_at = now;
    }
}

#[derive(Clone, Debug)]
pub struct PgNewsStore {
    pool: PgPool,
}

impl PgNewsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceStore<NewsRow> for PgNewsStore {
    async fn list(&self) -> RepoResult<Vec<NewsRow>> {
        let rows = sqlx::query_as::<_, NewsRow>(
            r#"
            SELECT
                "newsId", "authorId", title, news, "imageUrl", "createdAt", "updatedAt"
            FROM news
            ORDER BY "newsId" DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<NewsRow>> {
        let row = sqlx::query_as::<_, NewsRow>(
            r#"
            SELECT
                "newsId", "authorId", title, news, "imageUrl", "createdAt", "updatedAt"
            FROM news
            WHERE "newsId" = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_author(&self, author_id: Uuid) -> RepoResult<Vec<NewsRow>> {
        let rows = sqlx::query_as::<_, NewsRow>(
            r#"
            SELECT
                "newsId", "authorId", title, news, "imageUrl", "createdAt", "updatedAt"
            FROM news
            WHERE "authorId" = $1
            ORDER BY "newsId" DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create(&self, author_id: Uuid, draft: NewsDraft) -> RepoResult<NewsRow> {
        let row = sqlx::query_as::<_, NewsRow>(
            r#"
            INSERT INTO news ("authorId", title, news, "imageUrl")
            VALUES ($1, $2, $3, $4)
            RETURNING
                "newsId", "authorId", title, news, "imageUrl", "createdAt", "updatedAt"
            "#,
        )
        .bind(author_id)
        .bind(&draft.title)
        .bind(&draft.news)
        .bind(draft.image_url.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, draft: NewsDraft) -> RepoResult<Option<NewsRow>> {
        // The handler has already merged omitted fields with the stored row,
        // so every column is written as given.
        let row = sqlx::query_as::<_, NewsRow>(
            r#"
            UPDATE news
            SET
                title = $2,
                news = $3,
                "imageUrl" = $4,
                "updatedAt" = now()
            WHERE "newsId" = $1
            RETURNING
                "newsId", "authorId", title, news, "imageUrl", "createdAt", "updatedAt"
            "#,
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.news)
        .bind(draft.image_url.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM news
            WHERE "newsId" = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
