/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - stores (blogs / news), id_codec, auth (verifier + resolver)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - 起動後は read-only (request ごとの可変状態は持たない)
 */
use std::sync::Arc;

use crate::repos::{
    Stores, blog_repo::BlogRow, news_repo::NewsRow, store::ResourceStore,
};
use crate::services::{auth::AuthService, id_codec::IdCodec};

#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<dyn ResourceStore<BlogRow>>,
    pub news: Arc<dyn ResourceStore<NewsRow>>,
    pub id_codec: IdCodec,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(stores: Stores, id_codec: IdCodec, auth: Arc<AuthService>) -> Self {
        Self {
            blogs: stores.blogs,
            news: stores.news,
            id_codec,
            auth,
        }
    }
}
