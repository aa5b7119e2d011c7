/*
 * Responsibility
 * - axum::Json と同じく body を JSON として受ける
 * - 失敗 (Content-Type 不一致 / 構文エラー / 型不一致) は AppError に寄せて
 *   他のエラーと同じ `{ success: false, error: {...} }` で返す
 */
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T> FromRequest<AppState> for JsonBody<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
