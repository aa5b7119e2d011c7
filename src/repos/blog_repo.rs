/*
 * Responsibility
 * - blogs テーブル向け SQLx 操作
 * - authorId は INSERT 時にだけ書く (UPDATE では触らない)
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoResult;
use crate::repos::store::{Resource, ResourceStore};
use crate::services::policy::ResourceKind;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogRow {
    #[sqlx(rename = "blogId")]
    pub blog_id: i64,

    #[sqlx(rename = "authorId")]
    pub author_id: Uuid,

    pub title: String,
    pub description: String,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogDraft {
    pub title: String,
    pub description: String,
}

impl BlogRow {
    /// Byte-identical title and description.
    pub fn is_unchanged_by(&self, draft: &BlogDraft) -> bool {
        self.title == draft.title && self.description == draft.description
    }
}

impl Resource for BlogRow {
    type Draft = BlogDraft;

    const KIND: ResourceKind = ResourceKind::Blog;

    fn id(&self) -> i64 {
        self.blog_id
    }

    fn author_id(&self) -> Uuid {
        self.author_id
    }

    fn materialize(id: i64, author_id: Uuid, draft: BlogDraft, now: DateTime<Utc>) -> Self {
        Self {
            blog_id: id,
            author_id,
            title: draft.title,
            description: draft.description,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: BlogDraft, now: DateTime<Utc>) {
        self.title = draft.title;
        self.description = draft.description;
        self.updated_at = now;
    }
}

#[derive(Clone, Debug)]
pub struct PgBlogStore {
    pool: PgPool,
}

impl PgBlogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceStore<BlogRow> for PgBlogStore {
    async fn list(&self) -> RepoResult<Vec<BlogRow>> {
        let rows = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT
                "blogId", "authorId", title, description, "createdAt", "updatedAt"
            FROM blogs
            ORDER BY "blogId" DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<BlogRow>> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT
                "blogId", "authorId", title, description, "createdAt", "updatedAt"
            FROM blogs
            WHERE "blogId" = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_author(&self, author_id: Uuid) -> RepoResult<Vec<BlogRow>> {
        let rows = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT
                "blogId", "authorId", title, description, "createdAt", "updatedAt"
            FROM blogs
            WHERE "authorId" = $1
            ORDER BY "blogId" DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create(&self, author_id: Uuid, draft: BlogDraft) -> RepoResult<BlogRow> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            INSERT INTO blogs ("authorId", title, description)
            VALUES ($1, $2, $3)
            RETURNING
                "blogId", "authorId", title, description, "createdAt", "updatedAt"
            "#,
        )
        .bind(author_id)
        .bind(&draft.title)
        .bind(&draft.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, draft: BlogDraft) -> RepoResult<Option<BlogRow>> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            UPDATE blogs
            SET
                title = $2,
                description = $3,
                "updatedAt" = now()
            WHERE "blogId" = $1
            RETURNING
                "blogId", "authorId", title, description, "createdAt", "updatedAt"
            "#,
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM blogs
            WHERE "blogId" = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
