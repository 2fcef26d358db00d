//! Handlers for reviews (`/novels/{id}/reviews` and `/novels/{id}/review`).
//!
//! A user holds at most one review per novel; `PUT /novels/{id}/review`
//! upserts the caller's review.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use fable_core::error::CoreError;
use fable_core::types::DbId;
use fable_core::validation::validate_rating;
use fable_db::models::review::{Review, UpsertReview};
use fable_db::repositories::{clamp_limit, clamp_offset, NovelRepo, ReviewRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/novels/{id}/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(novel_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Review>>>> {
    NovelRepo::find_by_id(&state.pool, novel_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Novel",
            id: novel_id,
        }))?;

    let reviews = ReviewRepo::list_for_novel(
        &state.pool,
        novel_id,
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: reviews }))
}

/// PUT /api/v1/novels/{id}/review
///
/// Create or replace the caller's review of this novel.
pub async fn upsert_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(novel_id): Path<DbId>,
    Json(input): Json<UpsertReview>,
) -> AppResult<Json<DataResponse<Review>>> {
    NovelRepo::find_by_id(&state.pool, novel_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Novel",
            id: novel_id,
        }))?;

    validate_rating(input.rating).map_err(|_| {
        AppError::Core(CoreError::Validation("Rating must be between 1 and 5".into()))
    })?;

    let review = ReviewRepo::upsert(&state.pool, auth.user_id, novel_id, &input).await?;
    Ok(Json(DataResponse { data: review }))
}

/// DELETE /api/v1/novels/{id}/review
///
/// Remove the caller's review of this novel.
pub async fn delete_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(novel_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ReviewRepo::delete_for_user(&state.pool, auth.user_id, novel_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id: novel_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
