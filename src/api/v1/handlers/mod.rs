/*
 * Responsibility
 * - v1 handler の公開
 * - blogs / news で共通の小さな変換 (Path の user id, policy の評価結果 → AppError)
 */
pub mod blogs;
pub mod health;
pub mod news;

use uuid::Uuid;

use crate::error::AppError;
use crate::repos::store::Resource;
use crate::services::policy::Evaluation;

/// `/users/{user_id}/...` の user id は UUID そのまま (公開 ID 変換はしない)
fn parse_user_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::bad_request("INVALID_USER_ID", "invalid user id"))
}

fn into_permitted<R: Resource>(evaluation: Evaluation<R>) -> Result<R, AppError> {
    match evaluation {
        Evaluation::NotFound => Err(AppError::resource_not_found(R::KIND)),
        Evaluation::Forbidden(denial) => Err(denial.into()),
        Evaluation::Permitted(resource) => Ok(resource),
    }
}
