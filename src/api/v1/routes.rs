/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 読み取り系 (GET) は public、書き込み系のメソッドだけ access gate を通す
 * - 同じ path の GET と POST/PUT/DELETE は MethodRouter::merge で束ねる
 */
use axum::{
    Router,
    routing::{MethodRouter, get, post, put},
};

use crate::api::v1::handlers::{
    blogs::{create_blog, delete_blog, get_blog, list_blogs, list_user_blogs, update_blog},
    health::health,
    news::{create_news, delete_news, get_news, list_news, list_user_news, update_news},
};
use crate::middleware::auth::access;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let gated = |method_router: MethodRouter<AppState>| access::gate(method_router, &state);

    Router::new()
        .route("/health", get(health))
        .route("/blogs", get(list_blogs).merge(gated(post(create_blog))))
        .route(
            "/blogs/{blog_id}",
            get(get_blog).merge(gated(put(update_blog).delete(delete_blog))),
        )
        .route("/users/{user_id}/blogs", get(list_user_blogs))
        .route("/news", get(list_news).merge(gated(post(create_news))))
        .route(
            "/news/{news_id}",
            get(get_news).merge(gated(put(update_news).delete(delete_news))),
        )
        .route("/users/{user_id}/news", get(list_user_news))
}
