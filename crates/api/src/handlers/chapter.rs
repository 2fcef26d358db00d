//! Handlers for chapters (`/novels/{id}/chapters` and `/chapters/{id}`).
//!
//! Listings return summaries without the body text; the detail endpoint
//! returns the full chapter for the reading screen.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fable_core::error::CoreError;
use fable_core::types::DbId;
use fable_db::models::chapter::{Chapter, ChapterSummary, CreateChapter, UpdateChapter};
use fable_db::repositories::{ChapterRepo, NovelRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AdminUser, AuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/novels/{id}/chapters
///
/// List a novel's chapters in reading order. Drafts are included only for
/// admins.
pub async fn list_chapters(
    State(state): State<AppState>,
    admin: Option<AdminUser>,
    Path(novel_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ChapterSummary>>>> {
    // 404 for an unknown novel rather than an empty list.
    NovelRepo::find_by_id(&state.pool, novel_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Novel",
            id: novel_id,
        }))?;

    let published_only = admin.is_none();
    let chapters = ChapterRepo::list_for_novel(&state.pool, novel_id, published_only).await?;
    Ok(Json(DataResponse { data: chapters }))
}

/// GET /api/v1/chapters/{id}
pub async fn get_chapter(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Chapter>>> {
    let chapter = ChapterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Chapter",
            id,
        }))?;

    let is_admin = user.as_ref().is_some_and(AuthUser::is_admin);
    if !chapter.is_published && !is_admin {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Chapter",
            id,
        }));
    }

    Ok(Json(DataResponse { data: chapter }))
}

/// POST /api/v1/novels/{id}/chapters (admin)
///
/// Fails with 409 when the chapter number is already taken for this novel.
pub async fn create_chapter(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(novel_id): Path<DbId>,
    Json(input): Json<CreateChapter>,
) -> AppResult<(StatusCode, Json<DataResponse<Chapter>>)> {
    NovelRepo::find_by_id(&state.pool, novel_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Novel",
            id: novel_id,
        }))?;

    if input.chapter_number < 1 {
        return Err(AppError::Core(CoreError::Validation(
            "Chapter number must be positive".into(),
        )));
    }

    let chapter = ChapterRepo::create(&state.pool, novel_id, &input).await?;
    tracing::info!(
        novel_id,
        chapter_id = chapter.id,
        number = chapter.chapter_number,
        "Created chapter"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: chapter })))
}

/// PUT /api/v1/chapters/{id} (admin)
pub async fn update_chapter(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateChapter>,
) -> AppResult<Json<DataResponse<Chapter>>> {
    if matches!(input.chapter_number, Some(n) if n < 1) {
        return Err(AppError::Core(CoreError::Validation(
            "Chapter number must be positive".into(),
        )));
    }

    let chapter = ChapterRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Chapter",
            id,
        }))?;
    Ok(Json(DataResponse { data: chapter }))
}

/// DELETE /api/v1/chapters/{id} (admin)
pub async fn delete_chapter(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ChapterRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Chapter",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
