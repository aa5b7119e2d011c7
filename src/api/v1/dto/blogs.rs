/*
 * Responsibility
 * - Blogs の request/response DTO
 * - 公開 ID は encode 済みの値を返す (内部 ID を漏らさない)
 * - 未指定フィールドは空文字扱い → validate() で弾く
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::has_min_chars;
use crate::repos::blog_repo::BlogDraft;

pub const TITLE_MIN_CHARS: usize = 5;
pub const DESCRIPTION_MIN_CHARS: usize = 10;

pub const VALIDATION_MESSAGE: &str = "Title should contain at least 5 characters and description should contain at least 10 characters";

/// Body of both create and update: the full title/description pair.
#[derive(Debug, Deserialize)]
pub struct BlogRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl BlogRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !has_min_chars(&self.title, TITLE_MIN_CHARS)
            || !has_min_chars(&self.description, DESCRIPTION_MIN_CHARS)
        {
            return Err(VALIDATION_MESSAGE);
        }
        Ok(())
    }

    pub fn into_draft(self) -> BlogDraft {
        BlogDraft {
            title: self.title,
            description: self.description,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogResponse {
    pub id: String, // encoded
    pub author_id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct BlogPayload {
    pub blog: BlogResponse,
}

#[derive(Debug, Serialize)]
pub struct BlogListPayload {
    pub blogs: Vec<BlogResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, description: &str) -> BlogRequest {
        BlogRequest {
            title: title.into(),
            description: description.into(),
        }
    }

    #[test]
    fn enforces_minimum_lengths() {
        assert!(request("Hello World", "This is a test post body").validate().is_ok());
        assert!(request("Hi", "This is a test post body").validate().is_err());
        assert!(request("Hello World", "too short").validate().is_err());
        // exact boundaries
        assert!(request("12345", "1234567890").validate().is_ok());
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 5 characters, 15 bytes
        assert!(request("ブログです", "0123456789").validate().is_ok());
    }

    #[test]
    fn missing_fields_fail_validation() {
        let req: BlogRequest = serde_json::from_str(r#"{"title":"Hello World"}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
