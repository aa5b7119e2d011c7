//! In-memory store backends.
//!
//! Used when `DATABASE_URL` is not configured and by the test suite.
//! Every call takes the lock once, which matches the per-call atomicity the
//! Postgres backend gives; sequences of calls are not serialized.
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::error::RepoResult;
use crate::repos::store::{AccountStore, Resource, ResourceStore};

pub struct MemoryStore<R> {
    rows: RwLock<BTreeMap<i64, R>>,
    next_id: AtomicI64,
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl<R> MemoryStore<R> {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<R: Resource> ResourceStore<R> for MemoryStore<R> {
    async fn list(&self) -> RepoResult<Vec<R>> {
        let rows = self.rows.read().await;
        Ok(rows.values().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<R>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn find_by_author(&self, author_id: Uuid) -> RepoResult<Vec<R>> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .rev()
            .filter(|row| row.author_id() == author_id)
            .cloned()
            .collect())
    }

    async fn create(&self, author_id: Uuid, draft: R::Draft) -> RepoResult<R> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let row = R::materialize(id, author_id, draft, Utc::now());
        self.rows.write().await.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, draft: R::Draft) -> RepoResult<Option<R>> {
        let mut rows = self.rows.write().await;
        Ok(rows.get_mut(&id).map(|row| {
            row.apply(draft, Utc::now());
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct MemoryAccountStore {
    ids: RwLock<HashSet<Uuid>>,
}

impl MemoryAccountStore {
    pub fn with_accounts(ids: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            ids: RwLock::new(ids.into_iter().collect()),
        }
    }

    #[cfg(test)]
    pub async fn insert(&self, account_id: Uuid) {
        self.ids.write().await.insert(account_id);
    }

    #[cfg(test)]
    pub async fn remove(&self, account_id: Uuid) {
        self.ids.write().await.remove(&account_id);
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn exists(&self, account_id: Uuid) -> RepoResult<bool> {
        Ok(self.ids.read().await.contains(&account_id))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::repos::blog_repo::{BlogDraft, BlogRow};

    fn draft(title: &str, description: &str) -> BlogDraft {
        BlogDraft {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn list_and_find_by_author_are_newest_first() {
        let store = MemoryStore::<BlogRow>::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let first = store.create(alice, draft("first", "first body")).await.unwrap();
        store.create(bob, draft("second", "second body")).await.unwrap();
        let third = store.create(alice, draft("third", "third body")).await.unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].blog_id, third.blog_id);

        let by_alice: Vec<i64> = store
            .find_by_author(alice)
            .await
            .unwrap()
            .iter()
            .map(|row| row.blog_id)
            .collect();
        assert_eq!(by_alice, vec![third.blog_id, first.blog_id]);
    }

    #[tokio::test]
    async fn update_keeps_author_and_reports_missing_rows() {
        let store = MemoryStore::<BlogRow>::new();
        let author = Uuid::new_v4();
        let row = store.create(author, draft("title", "description")).await.unwrap();

        let updated = store
            .update(row.blog_id, draft("new title", "new description"))
            .await
            .unwrap()
            .expect("row exists");
        assert_eq!(updated.author_id, author);
        assert_eq!(updated.created_at, row.created_at);
        assert_eq!(updated.title, "new title");

        assert!(store.update(999, draft("x", "y")).await.unwrap().is_none());
        assert!(store.delete(row.blog_id).await.unwrap());
        assert!(!store.delete(row.blog_id).await.unwrap());
    }

    #[tokio::test]
    async fn concurrent_updates_are_last_write_wins() {
        let store = Arc::new(MemoryStore::<BlogRow>::new());
        let row = store
            .create(Uuid::new_v4(), draft("original", "original body"))
            .await
            .unwrap();

        let id = row.blog_id;
        let a = draft("writer a", "body from writer a");
        let b = draft("writer b", "body from writer b");

        let (ra, rb) = tokio::join!(
            tokio::spawn({
                let store = store.clone();
                let a = a.clone();
                async move { store.update(id, a).await }
            }),
            tokio::spawn({
                let store = store.clone();
                let b = b.clone();
                async move { store.update(id, b).await }
            }),
        );
        assert!(ra.unwrap().unwrap().is_some());
        assert!(rb.unwrap().unwrap().is_some());

        let stored = store.find_by_id(id).await.unwrap().unwrap();
        let stored = draft(&stored.title, &stored.description);
        assert!(stored == a || stored == b, "one full write must win");
    }

    #[tokio::test]
    async fn account_store_tracks_existence() {
        let known = Uuid::new_v4();
        let accounts = MemoryAccountStore::with_accounts([known]);

        assert!(accounts.exists(known).await.unwrap());
        assert!(!accounts.exists(Uuid::new_v4()).await.unwrap());

        accounts.remove(known).await;
        assert!(!accounts.exists(known).await.unwrap());
    }
}
