/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - RepoError / AuthError / policy の Denial / IdCodecError を統一的に変換
 */
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::auth::AuthError;
use crate::services::id_codec::IdCodecError;
use crate::services::policy::{Denial, Operation, ResourceKind};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Please authenticate using a valid token")]
    MissingToken,
    #[error("Invalid authentication token")]
    InvalidToken,
    #[error("User Not Found")]
    AccountNotFound,
    #[error("{message}")]
    NotFound { message: String },
    #[error("{}", denial_message(.0))]
    PermissionDenied(Denial),
    #[error("{message}")]
    ValidationFailed {
        kind: ResourceKind,
        message: &'static str,
    },
    #[error("Please enter a new description and title to update")]
    NoOpUpdate,
    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    // Raw store message goes back to the caller as-is.
    #[error("{0}")]
    Store(String),
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn resource_not_found(kind: ResourceKind) -> Self {
        Self::not_found(format!("{} not found", kind.label()))
    }
}

fn denial_message(denial: &Denial) -> &'static str {
    match (denial.kind, denial.operation) {
        (ResourceKind::Blog, Operation::Create) => "Only Admins are allowed to post blogs",
        (ResourceKind::Blog, Operation::Update) => "Not allowed to update",
        (ResourceKind::Blog, Operation::Delete) => "Not allowed to delete",
        (ResourceKind::News, Operation::Create) => "Not allowed to add news",
        (ResourceKind::News, Operation::Update) => "Not allowed to update",
        (ResourceKind::News, Operation::Delete) => "Not allowed to delete the news",
    }
}

fn denial_status(denial: &Denial) -> StatusCode {
    match (denial.kind, denial.operation) {
        (ResourceKind::Blog, Operation::Create) => StatusCode::METHOD_NOT_ALLOWED,
        _ => StatusCode::FORBIDDEN,
    }
}

fn validation_status(kind: ResourceKind) -> StatusCode {
    match kind {
        ResourceKind::Blog => StatusCode::METHOD_NOT_ALLOWED,
        ResourceKind::News => StatusCode::FORBIDDEN,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::MissingToken => (StatusCode::UNAUTHORIZED, "MISSING_TOKEN"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            AppError::AccountNotFound => (StatusCode::NOT_FOUND, "ACCOUNT_NOT_FOUND"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::PermissionDenied(denial) => (denial_status(denial), "PERMISSION_DENIED"),
            AppError::ValidationFailed { kind, .. } => {
                (validation_status(*kind), "VALIDATION_FAILED")
            }
            // A rejected no-op is an outcome, not a failure
            AppError::NoOpUpdate => (StatusCode::OK, "NO_OP_UPDATE"),
            AppError::InvalidBody { status, .. } => (*status, "INVALID_BODY"),
            AppError::BadRequest { code, .. } => (StatusCode::BAD_REQUEST, *code),
            AppError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_FAILURE"),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR"),
        };

        let message = match &self {
            AppError::BadRequest { message, .. } => message.clone(),
            other => other.to_string(),
        };

        let body = ErrorResponse {
            success: false,
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<Denial> for AppError {
    fn from(denial: Denial) -> Self {
        AppError::PermissionDenied(denial)
    }
}

// 415 (Content-Type), 400 (syntax), 422 (shape) keep axum's status
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = %e, "store failure");
        AppError::Store(e.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidToken(_) => AppError::InvalidToken,
            AuthError::AccountNotFound => AppError::AccountNotFound,
            AuthError::Store(e) => e.into(),
        }
    }
}

impl From<IdCodecError> for AppError {
    fn from(e: IdCodecError) -> Self {
        match e {
            // Client supplied a malformed public id (e.g. /blogs/{id})
            IdCodecError::DecodeInvalidFormat | IdCodecError::DecodeOutOfRange => {
                AppError::bad_request("INVALID_PUBLIC_ID", "invalid id")
            }
            // Server-side config / programming errors
            _ => {
                tracing::error!(error = %e, "id codec failure");
                AppError::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn blog_create_denial_is_method_not_allowed() {
        let (status, body) = render(AppError::PermissionDenied(Denial {
            kind: ResourceKind::Blog,
            operation: Operation::Create,
        }))
        .await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "PERMISSION_DENIED");
        assert_eq!(
            body["error"]["message"],
            "Only Admins are allowed to post blogs"
        );
    }

    #[tokio::test]
    async fn news_denials_are_forbidden() {
        for operation in [Operation::Create, Operation::Update, Operation::Delete] {
            let (status, _) = render(AppError::PermissionDenied(Denial {
                kind: ResourceKind::News,
                operation,
            }))
            .await;
            assert_eq!(status, StatusCode::FORBIDDEN);
        }
    }

    #[tokio::test]
    async fn store_failure_carries_raw_message() {
        let (status, body) = render(AppError::Store("db error: pool timed out".into())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "db error: pool timed out");
    }

    #[tokio::test]
    async fn no_op_update_is_reported_without_error_status() {
        let (status, body) = render(AppError::NoOpUpdate).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "NO_OP_UPDATE");
    }
}
