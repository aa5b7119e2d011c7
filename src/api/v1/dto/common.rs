/*
 * Responsibility
 * - 成功レスポンスの共通 envelope: `{ "success": true, "message"?: ..., <payload> }`
 * - エラー側の envelope は error.rs (ErrorResponse)
 */
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message: Some(message),
            data,
        }
    }
}

/// Payload for message-only responses (e.g. delete).
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    pub fn message(message: &'static str) -> Self {
        Self::with_message(message, Empty {})
    }
}

/// Length in characters, not bytes.
pub fn has_min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}
