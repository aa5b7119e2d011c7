/*
 * Responsibility
 * - /news 系 handler
 * - 更新は existence → admin かつ author → merge → validate の順
 *   (Blog と違い validate は merge 後の値に対して行う)
 */
use axum::{
    Json,
    extract::{Path, State},
};

use super::{into_permitted, parse_user_id};
use crate::{
    api::v1::{
        dto::{
            common::{ApiResponse, Empty},
            news::{
                CreateNewsRequest, NewsListPayload, NewsPayload, NewsResponse, UpdateNewsRequest,
            },
        },
        extractors::{AuthCtx, JsonBody, public_id::PublicNewsId},
    },
    error::AppError,
    repos::news_repo::NewsRow,
    services::policy::{self, DeleteOutcome, Operation, ResourceKind},
    state::AppState,
};

fn row_to_response(state: &AppState, row: NewsRow) -> Result<NewsResponse, AppError> {
    let public_id = state.id_codec.encode(row.news_id)?;

    Ok(NewsResponse {
        id: public_id,
        author_id: row.author_id,
        title: row.title,
        news: row.news,
        image_url: row.image_url,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn rows_to_response(state: &AppState, rows: Vec<NewsRow>) -> Result<Vec<NewsResponse>, AppError> {
    rows.into_iter()
        .map(|row| row_to_response(state, row))
        .collect()
}

fn invalid(message: &'static str) -> AppError {
    AppError::ValidationFailed {
        kind: ResourceKind::News,
        message,
    }
}

pub async fn list_news(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<NewsListPayload>>, AppError> {
    let rows = state.news.list().await?;
    let news = rows_to_response(&state, rows)?;

    Ok(Json(ApiResponse::ok(NewsListPayload { news })))
}

pub async fn get_news(
    State(state): State<AppState>,
    news_id: PublicNewsId,
) -> Result<Json<ApiResponse<NewsPayload>>, AppError> {
    let row = state
        .news
        .find_by_id(news_id.id)
        .await?
        .ok_or_else(|| AppError::resource_not_found(ResourceKind::News))?;

    let news = row_to_response(&state, row)?;
    Ok(Json(ApiResponse::ok(NewsPayload { news })))
}

pub async fn list_user_news(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<NewsListPayload>>, AppError> {
    let author_id = parse_user_id(&user_id)?;

    let rows = state.news.find_by_author(author_id).await?;
    if rows.is_empty() {
        return Err(AppError::not_found("News not found for this user"));
    }

    let news = rows_to_response(&state, rows)?;
    Ok(Json(ApiResponse::ok(NewsListPayload { news })))
}

pub async fn create_news(
    State(state): State<AppState>,
    AuthCtx(identity): AuthCtx,
    JsonBody(req): JsonBody<CreateNewsRequest>,
) -> Result<Json<ApiResponse<NewsPayload>>, AppError> {
    policy::authorize_create(ResourceKind::News, &identity)?;
    let draft = req.into_draft().map_err(invalid)?;

    let row = state.news.create(identity.account_id(), draft).await?;

    tracing::info!(news_id = row.news_id, author_id = %row.author_id, "news created");

    let news = row_to_response(&state, row)?;
    Ok(Json(ApiResponse::with_message(
        "News added successfully",
        NewsPayload { news },
    )))
}

pub async fn update_news(
    State(state): State<AppState>,
    AuthCtx(identity): AuthCtx,
    news_id: PublicNewsId,
    JsonBody(req): JsonBody<UpdateNewsRequest>,
) -> Result<Json<ApiResponse<NewsPayload>>, AppError> {
    let evaluation =
        policy::load_for::<NewsRow>(&*state.news, news_id.id, Operation::Update, &identity)
            .await?;
    let current = into_permitted(evaluation)?;

    let draft = req.merge_onto(&current).map_err(invalid)?;

    let row = state
        .news
        .update(current.news_id, draft)
        .await?
        .ok_or_else(|| AppError::resource_not_found(ResourceKind::News))?;

    let news = row_to_response(&state, row)?;
    Ok(Json(ApiResponse::with_message(
        "News updated successfully",
        NewsPayload { news },
    )))
}

pub async fn delete_news(
    State(state): State<AppState>,
    AuthCtx(identity): AuthCtx,
    news_id: PublicNewsId,
) -> Result<Json<ApiResponse<Empty>>, AppError> {
    match policy::delete_owned::<NewsRow>(&*state.news, news_id.id, &identity).await? {
        DeleteOutcome::NotFound => Err(AppError::resource_not_found(ResourceKind::News)),
        DeleteOutcome::Forbidden(denial) => Err(denial.into()),
        DeleteOutcome::Deleted => {
            tracing::info!(news_id = news_id.id, "news deleted");
            Ok(Json(ApiResponse::message("News deleted successfully")))
        }
    }
}
