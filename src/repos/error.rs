/*
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - 想定外の store 失敗はすべてここに集約 (HTTP では 500)
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error: {0}")]
    Db(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;
