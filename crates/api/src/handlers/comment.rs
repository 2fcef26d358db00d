//! Handlers for comments (`/novels/{id}/comments` and `/comments/{id}`).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use fable_core::error::CoreError;
use fable_core::types::DbId;
use fable_db::models::comment::{Comment, CreateComment};
use fable_db::repositories::{clamp_limit, clamp_offset, CommentRepo, NovelRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum accepted comment length in characters.
const MAX_COMMENT_CHARS: usize = 4000;

/// Query parameters for `GET /novels/{id}/comments`.
#[derive(Debug, Deserialize)]
pub struct CommentListParams {
    /// Restrict to a single chapter's comments.
    pub chapter_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/novels/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(novel_id): Path<DbId>,
    Query(params): Query<CommentListParams>,
) -> AppResult<Json<DataResponse<Vec<Comment>>>> {
    NovelRepo::find_by_id(&state.pool, novel_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Novel",
            id: novel_id,
        }))?;

    let comments = CommentRepo::list_for_novel(
        &state.pool,
        novel_id,
        params.chapter_id,
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/novels/{id}/comments
pub async fn create_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(novel_id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    NovelRepo::find_by_id(&state.pool, novel_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Novel",
            id: novel_id,
        }))?;

    let body = input.body.trim();
    if body.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Comment body must not be empty".into(),
        )));
    }
    if body.chars().count() > MAX_COMMENT_CHARS {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Comment exceeds {MAX_COMMENT_CHARS} characters"
        ))));
    }

    let comment = CommentRepo::create(&state.pool, auth.user_id, novel_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// DELETE /api/v1/comments/{id}
///
/// Allowed for the comment's author or an admin.
pub async fn delete_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;

    if comment.user_id != auth.user_id && !auth.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author or an admin may delete a comment".into(),
        )));
    }

    CommentRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
