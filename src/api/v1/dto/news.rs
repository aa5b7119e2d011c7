/*
 * Responsibility
 * - News の request/response DTO
 * - 更新は部分更新: 未指定・空文字のフィールドは既存値を引き継ぐ
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::has_min_chars;
use crate::repos::news_repo::{NewsDraft, NewsRow};

pub const TITLE_MIN_CHARS: usize = 5;
pub const NEWS_MIN_CHARS: usize = 10;

pub const VALIDATION_MESSAGE: &str = "Input validation failed, title should contain at least 5 characters and news should contain at least 10 characters";

fn validate_draft(draft: &NewsDraft) -> Result<(), &'static str> {
    if !has_min_chars(&draft.title, TITLE_MIN_CHARS) || !has_min_chars(&draft.news, NEWS_MIN_CHARS)
    {
        return Err(VALIDATION_MESSAGE);
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub news: String,
    pub image_url: Option<String>,
}

impl CreateNewsRequest {
    /// Validated draft ready for the store.
    pub fn into_draft(self) -> Result<NewsDraft, &'static str> {
        let draft = NewsDraft {
            title: self.title,
            news: self.news,
            image_url: non_empty(self.image_url),
        };
        validate_draft(&draft)?;
        Ok(draft)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNewsRequest {
    pub title: Option<String>,
    pub news: Option<String>,
    pub image_url: Option<String>,
}

impl UpdateNewsRequest {
    /// Merge onto the stored row, then validate the merged result.
    pub fn merge_onto(self, current: &NewsRow) -> Result<NewsDraft, &'static str> {
        let draft = NewsDraft {
            title: non_empty(self.title).unwrap_or_else(|| current.title.clone()),
            news: non_empty(self.news).unwrap_or_else(|| current.news.clone()),
            image_url: non_empty(self.image_url).or_else(|| current.image_url.clone()),
        };
        validate_draft(&draft)?;
        Ok(draft)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    pub id: String, // encoded
    pub author_id: Uuid,
    pub title: String,
    pub news: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct NewsPayload {
    pub news: NewsResponse,
}

#[derive(Debug, Serialize)]
pub struct NewsListPayload {
    pub news: Vec<NewsResponse>,
}
