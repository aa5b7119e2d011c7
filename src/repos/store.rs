//! Store interfaces consumed by handlers, the identity resolver and the ownership policy.
//!
//! Backends (Postgres / in-memory) implement these; callers only see `Arc<dyn ...>`.
//! Each call is assumed atomic on its own. Nothing here serializes two calls,
//! so concurrent updates to the same id are last-write-wins.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::repos::error::RepoResult;
use crate::services::policy::ResourceKind;

/// A row owned by an account through `author_id`.
///
/// `author_id` is fixed at creation. `Draft` carries only the mutable fields,
/// so an update can never move ownership.
pub trait Resource: Clone + Send + Sync + 'static {
    type Draft: Clone + Send + Sync + 'static;

    const KIND: ResourceKind;

    fn id(&self) -> i64;

    fn author_id(&self) -> Uuid;

    /// Build a fresh row (used by stores that do not generate rows themselves).
    fn materialize(id: i64, author_id: Uuid, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Overwrite the mutable fields.
    fn apply(&mut self, draft: Self::Draft, now: DateTime<Utc>);
}

#[async_trait]
pub trait ResourceStore<R: Resource>: Send + Sync {
    /// Newest first.
    async fn list(&self) -> RepoResult<Vec<R>>;

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<R>>;

    async fn find_by_author(&self, author_id: Uuid) -> RepoResult<Vec<R>>;

    async fn create(&self, author_id: Uuid, draft: R::Draft) -> RepoResult<R>;

    // Ok(None) => row no longer exists
    async fn update(&self, id: i64, draft: R::Draft) -> RepoResult<Option<R>>;

    // Ok(false) => nothing deleted
    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn exists(&self, account_id: Uuid) -> RepoResult<bool>;
}
