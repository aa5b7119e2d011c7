/*
 * Responsibility
 * - users テーブル向け SQLx 操作
 * - この API はアカウントの「存在確認」だけを行う (作成・更新は別サービスの責務)
 */
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoResult;
use crate::repos::store::AccountStore;

#[derive(Clone, Debug)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn exists(&self, account_id: Uuid) -> RepoResult<bool> {
        let found = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM users WHERE "userId" = $1
            )
            "#,
        )
        .bind(account_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(found)
    }
}
