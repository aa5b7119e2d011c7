use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::Identity;
use crate::state::AppState;

/// Handler で、認証済み Identity を受け取るための extractor
/// middleware が Identity を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す (gate が掛かっていない route で使った場合)
#[derive(Debug, Clone, Copy)]
pub struct AuthCtx(pub Identity);

impl FromRequestParts<AppState> for AuthCtx {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .copied()
            .map(AuthCtx)
            .ok_or(AppError::MissingToken)
    }
}
