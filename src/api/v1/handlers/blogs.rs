/*
 * Responsibility
 * - /blogs 系 handler
 * - Path の {blog_id} は公開 ID → extractor で内部 ID に変換して受け取る
 * - 書き込み系は gate 通過済みの AuthCtx を受け取り、policy で判定してから store を触る
 */
use axum::{
    Json,
    extract::{Path, State},
};

use super::{into_permitted, parse_user_id};
use crate::{
    api::v1::{
        dto::{
            blogs::{BlogListPayload, BlogPayload, BlogRequest, BlogResponse},
            common::{ApiResponse, Empty},
        },
        extractors::{AuthCtx, JsonBody, public_id::PublicBlogId},
    },
    error::AppError,
    repos::blog_repo::BlogRow,
    services::policy::{self, DeleteOutcome, Operation, ResourceKind},
    state::AppState,
};

fn row_to_response(state: &AppState, row: BlogRow) -> Result<BlogResponse, AppError> {
    let public_id = state.id_codec.encode(row.blog_id)?;

    Ok(BlogResponse {
        id: public_id,
        author_id: row.author_id,
        title: row.title,
        description: row.description,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn rows_to_response(state: &AppState, rows: Vec<BlogRow>) -> Result<Vec<BlogResponse>, AppError> {
    rows.into_iter()
        .map(|row| row_to_response(state, row))
        .collect()
}

fn invalid(message: &'static str) -> AppError {
    AppError::ValidationFailed {
        kind: ResourceKind::Blog,
        message,
    }
}

pub async fn list_blogs(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<BlogListPayload>>, AppError> {
    let rows = state.blogs.list().await?;
    let blogs = rows_to_response(&state, rows)?;

    Ok(Json(ApiResponse::ok(BlogListPayload { blogs })))
}

pub async fn get_blog(
    State(state): State<AppState>,
    blog_id: PublicBlogId,
) -> Result<Json<ApiResponse<BlogPayload>>, AppError> {
    let row = state
        .blogs
        .find_by_id(blog_id.id)
        .await?
        .ok_or_else(|| AppError::resource_not_found(ResourceKind::Blog))?;

    let blog = row_to_response(&state, row)?;
    Ok(Json(ApiResponse::ok(BlogPayload { blog })))
}

pub async fn list_user_blogs(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<BlogListPayload>>, AppError> {
    let author_id = parse_user_id(&user_id)?;

    let rows = state.blogs.find_by_author(author_id).await?;
    if rows.is_empty() {
        return Err(AppError::not_found("No blogs found for this user"));
    }

    let blogs = rows_to_response(&state, rows)?;
    Ok(Json(ApiResponse::ok(BlogListPayload { blogs })))
}

pub async fn create_blog(
    State(state): State<AppState>,
    AuthCtx(identity): AuthCtx,
    JsonBody(req): JsonBody<BlogRequest>,
) -> Result<Json<ApiResponse<BlogPayload>>, AppError> {
    policy::authorize_create(ResourceKind::Blog, &identity)?;
    req.validate().map_err(invalid)?;

    let row = state
        .blogs
        .create(identity.account_id(), req.into_draft())
        .await?;

    tracing::info!(blog_id = row.blog_id, author_id = %row.author_id, "blog created");

    let blog = row_to_response(&state, row)?;
    Ok(Json(ApiResponse::with_message(
        "Blog added successfully",
        BlogPayload { blog },
    )))
}

pub async fn update_blog(
    State(state): State<AppState>,
    AuthCtx(identity): AuthCtx,
    blog_id: PublicBlogId,
    JsonBody(req): JsonBody<BlogRequest>,
) -> Result<Json<ApiResponse<BlogPayload>>, AppError> {
    req.validate().map_err(invalid)?;

    let evaluation =
        policy::load_for::<BlogRow>(&*state.blogs, blog_id.id, Operation::Update, &identity)
            .await?;
    let current = into_permitted(evaluation)?;

    let draft = req.into_draft();
    if current.is_unchanged_by(&draft) {
        return Err(AppError::NoOpUpdate);
    }

    // 判定後に削除された場合は None
    let row = state
        .blogs
        .update(current.blog_id, draft)
        .await?
        .ok_or_else(|| AppError::resource_not_found(ResourceKind::Blog))?;

    let blog = row_to_response(&state, row)?;
    Ok(Json(ApiResponse::with_message(
        "Blog updated successfully",
        BlogPayload { blog },
    )))
}

pub async fn delete_blog(
    State(state): State<AppState>,
    AuthCtx(identity): AuthCtx,
    blog_id: PublicBlogId,
) -> Result<Json<ApiResponse<Empty>>, AppError> {
    match policy::delete_owned::<BlogRow>(&*state.blogs, blog_id.id, &identity).await? {
        DeleteOutcome::NotFound => Err(AppError::resource_not_found(ResourceKind::Blog)),
        DeleteOutcome::Forbidden(denial) => Err(denial.into()),
        DeleteOutcome::Deleted => {
            tracing::info!(blog_id = blog_id.id, "blog deleted");
            Ok(Json(ApiResponse::message("Blog deleted successfully")))
        }
    }
}
