//! Handlers for the `/novels` resource.
//!
//! Listing and detail are public (published novels only); mutations require
//! the admin role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use fable_core::error::CoreError;
use fable_core::types::DbId;
use fable_db::models::novel::{CreateNovel, Novel, NovelFilter, NovelSummary, UpdateNovel};
use fable_db::repositories::{clamp_limit, clamp_offset, NovelRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AdminUser, AuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /novels`.
#[derive(Debug, Deserialize)]
pub struct NovelListParams {
    /// Case-insensitive title/author search.
    pub q: Option<String>,
    pub genre: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/novels
///
/// Public catalog listing. Unpublished novels are visible only to admins
/// (detected from an optional Bearer token).
pub async fn list_novels(
    State(state): State<AppState>,
    admin: Option<AdminUser>,
    Query(params): Query<NovelListParams>,
) -> AppResult<Json<DataResponse<Vec<NovelSummary>>>> {
    let filter = NovelFilter {
        q: params.q,
        genre: params.genre,
        include_unpublished: admin.is_some(),
    };
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let novels = NovelRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: novels }))
}

/// GET /api/v1/novels/{id}
pub async fn get_novel(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Novel>>> {
    let novel = NovelRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Novel",
            id,
        }))?;

    // Drafts are only visible to admins.
    let is_admin = user.as_ref().is_some_and(AuthUser::is_admin);
    if !novel.is_published && !is_admin {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Novel",
            id,
        }));
    }

    Ok(Json(DataResponse { data: novel }))
}

/// POST /api/v1/novels (admin)
pub async fn create_novel(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(input): Json<CreateNovel>,
) -> AppResult<(StatusCode, Json<DataResponse<Novel>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must not be empty".into(),
        )));
    }

    let novel = NovelRepo::create(&state.pool, &input).await?;
    tracing::info!(novel_id = novel.id, title = %novel.title, "Created novel");
    Ok((StatusCode::CREATED, Json(DataResponse { data: novel })))
}

/// PUT /api/v1/novels/{id} (admin)
pub async fn update_novel(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNovel>,
) -> AppResult<Json<DataResponse<Novel>>> {
    if let Some(status) = input.status.as_deref() {
        if status != "ongoing" && status != "completed" {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown status: {status}"
            ))));
        }
    }

    let novel = NovelRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Novel",
            id,
        }))?;
    Ok(Json(DataResponse { data: novel }))
}

/// DELETE /api/v1/novels/{id} (admin)
///
/// Cascades to chapters, comments, reviews, and interactions.
pub async fn delete_novel(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = NovelRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Novel",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
