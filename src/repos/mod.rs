/*
 * Responsibility
 * - store 実装の公開と、Config に応じた backend の選択
 *   - DATABASE_URL あり: Postgres (sqlx)
 *   - なし: in-memory (ローカル開発用)
 */
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use crate::config::Config;

pub mod blog_repo;
pub mod error;
pub mod memory;
pub mod news_repo;
pub mod store;
pub mod user_repo;

use blog_repo::{BlogRow, PgBlogStore};
use error::RepoResult;
use memory::{MemoryAccountStore, MemoryStore};
use news_repo::{NewsRow, PgNewsStore};
use store::{AccountStore, ResourceStore};
use user_repo::PgAccountStore;

#[derive(Clone)]
pub struct Stores {
    pub accounts: Arc<dyn AccountStore>,
    pub blogs: Arc<dyn ResourceStore<BlogRow>>,
    pub news: Arc<dyn ResourceStore<NewsRow>>,
}

impl Stores {
    pub async fn from_config(config: &Config) -> RepoResult<Self> {
        match &config.database_url {
            Some(url) => {
                let pool = PgPoolOptions::new()
                    .max_connections(config.database_max_connections)
                    .connect(url)
                    .await?;

                tracing::info!("using postgres store");

                Ok(Self {
                    accounts: Arc::new(PgAccountStore::new(pool.clone())),
                    blogs: Arc::new(PgBlogStore::new(pool.clone())),
                    news: Arc::new(PgNewsStore::new(pool)),
                })
            }
            None => {
                tracing::warn!(
                    seeded_accounts = config.seed_account_ids.len(),
                    "DATABASE_URL is not set; using in-memory store (data is lost on restart)"
                );

                Ok(Self {
                    accounts: Arc::new(MemoryAccountStore::with_accounts(
                        config.seed_account_ids.iter().copied(),
                    )),
                    blogs: Arc::new(MemoryStore::<BlogRow>::new()),
                    news: Arc::new(MemoryStore::<NewsRow>::new()),
                })
            }
        }
    }
}
