//! Shared fixtures for in-crate tests: token signing and an app over in-memory stores.
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use jsonwebtoken::{EncodingKey, Header};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use crate::app::build_router;
use crate::middleware::auth::access::TOKEN_HEADER;
use crate::repos::{
    Stores,
    blog_repo::BlogRow,
    memory::{MemoryAccountStore, MemoryStore},
    news_repo::NewsRow,
};
use crate::services::{
    auth::{AuthService, IdentityResolver, TokenVerifier, identity::Role},
    id_codec::IdCodec,
};
use crate::state::AppState;

pub const SECRET: &str = "test-access-token-secret";

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// HS256 token over arbitrary claims.
pub fn sign(secret: &str, claims: Value) -> String {
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn token_for(account_id: Uuid, role: Role) -> String {
    let role = match role {
        Role::Admin => "admin",
        Role::User => "user",
    };
    sign(
        SECRET,
        json!({ "sub": account_id, "role": role, "exp": now_secs() + 600 }),
    )
}

pub struct TestApp {
    pub router: Router,
    pub id_codec: IdCodec,
    pub accounts: Arc<MemoryAccountStore>,
    pub blogs: Arc<MemoryStore<BlogRow>>,
    pub news: Arc<MemoryStore<NewsRow>>,
}

/// Full v1 router over the given stores, with the test secret and id codec.
pub fn router_over(stores: Stores) -> Router {
    let auth = Arc::new(AuthService::new(
        TokenVerifier::new(SECRET.as_bytes(), None, None, 0),
        IdentityResolver::new(stores.accounts.clone()),
    ));
    build_router(AppState::new(stores, id_codec(), auth))
}

fn id_codec() -> IdCodec {
    IdCodec::new(10, ALPHABET).unwrap()
}

impl TestApp {
    pub fn new() -> Self {
        let accounts = Arc::new(MemoryAccountStore::default());
        let blogs = Arc::new(MemoryStore::<BlogRow>::new());
        let news = Arc::new(MemoryStore::<NewsRow>::new());

        let router = router_over(Stores {
            accounts: accounts.clone(),
            blogs: blogs.clone(),
            news: news.clone(),
        });

        Self {
            router,
            id_codec: id_codec(),
            accounts,
            blogs,
            news,
        }
    }

    /// Registers an account and returns a valid token for it.
    pub async fn account(&self, role: Role) -> (Uuid, String) {
        let account_id = Uuid::new_v4();
        self.accounts.insert(account_id).await;
        (account_id, token_for(account_id, role))
    }

    pub fn public_id(&self, id: i64) -> String {
        self.id_codec.encode(id).unwrap()
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(TOKEN_HEADER, token);
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        send_to(&self.router, request).await
    }
}

/// Empty bodies come back as `Value::Null`.
pub async fn send_to(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}
