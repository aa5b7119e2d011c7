//! Authorization gate: `token` header → verify → resolve → `Identity` in extensions.
//!
//! Layered onto the mutating method handlers only; read routes stay public and
//! an unsupported method is still a plain 405.
//! Every failure ends the request here and the handler never runs:
//! - header missing / blank      → 401 MISSING_TOKEN
//! - signature / expiry / claims → 401 INVALID_TOKEN
//! - account no longer exists    → 404 ACCOUNT_NOT_FOUND

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, Request},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::error::AppError;
use crate::services::auth::AuthError;
use crate::state::AppState;

pub const TOKEN_HEADER: HeaderName = HeaderName::from_static("token");

/// 認証が必要なメソッドにだけ gate を掛ける。
///
/// 例：
/// ```ignore
/// .route("/blogs", get(list_blogs).merge(access::gate(post(create_blog), &state)))
/// ```
pub fn gate(method_router: MethodRouter<AppState>, state: &AppState) -> MethodRouter<AppState> {
    // MethodRouter::route_layer は fallback (未対応メソッドの 405) を包まない
    method_router.route_layer(middleware::from_fn_with_state(
        state.clone(),
        access_middleware,
    ))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let raw = req
        .headers()
        .get(&TOKEN_HEADER)
        .ok_or(AppError::MissingToken)?;

    let token = raw
        .to_str()
        .map_err(|_| AppError::InvalidToken)?
        .trim();
    if token.is_empty() {
        return Err(AppError::MissingToken);
    }

    let identity = match state.auth.authenticate(token).await {
        Ok(identity) => identity,
        // store failures are logged once, by the AppError conversion
        Err(AuthError::Store(err)) => return Err(err.into()),
        Err(err) => {
            tracing::warn!(error = %err, "access token rejected");
            return Err(err.into());
        }
    };

    tracing::debug!(
        account_id = %identity.account_id(),
        role = ?identity.role(),
        "request authenticated"
    );

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
