//! Handlers for user-novel interactions (follow, wishlist, reading progress)
//! and the `/me/library` listing.

use axum::extract::{Path, Query, State};
use axum::Json;
use fable_core::error::CoreError;
use fable_core::types::DbId;
use fable_core::validation::validate_progress;
use fable_db::models::interaction::{LibraryEntry, NovelInteraction, UpsertInteraction};
use fable_db::repositories::interaction_repo::LibraryFilter;
use fable_db::repositories::{clamp_limit, clamp_offset, InteractionRepo, NovelRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /me/library`.
#[derive(Debug, Deserialize)]
pub struct LibraryParams {
    /// `following` | `wishlist`; anything absent means everything.
    pub filter: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/novels/{id}/interaction
///
/// The caller's interaction record for this novel. Returns a default
/// (all-false, zero-progress) record when none exists yet, so the client
/// does not have to special-case first contact.
pub async fn get_interaction(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(novel_id): Path<DbId>,
) -> AppResult<Json<DataResponse<NovelInteraction>>> {
    NovelRepo::find_by_id(&state.pool, novel_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Novel",
            id: novel_id,
        }))?;

    let interaction = match InteractionRepo::find(&state.pool, auth.user_id, novel_id).await? {
        Some(row) => row,
        None => {
            // Materialize the default row; upsert with no fields set.
            InteractionRepo::upsert(
                &state.pool,
                auth.user_id,
                novel_id,
                &UpsertInteraction::default(),
            )
            .await?
        }
    };
    Ok(Json(DataResponse { data: interaction }))
}

/// PUT /api/v1/novels/{id}/interaction
///
/// Partial upsert: absent fields keep their current value.
pub async fn update_interaction(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(novel_id): Path<DbId>,
    Json(input): Json<UpsertInteraction>,
) -> AppResult<Json<DataResponse<NovelInteraction>>> {
    NovelRepo::find_by_id(&state.pool, novel_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Novel",
            id: novel_id,
        }))?;

    if let Some(progress) = input.reading_progress {
        validate_progress(progress).map_err(|_| {
            AppError::Core(CoreError::Validation(
                "Reading progress must be between 0.0 and 1.0".into(),
            ))
        })?;
    }

    let interaction = InteractionRepo::upsert(&state.pool, auth.user_id, novel_id, &input).await?;
    Ok(Json(DataResponse { data: interaction }))
}

/// GET /api/v1/me/library
///
/// The caller's followed/wishlisted novels with reading positions.
pub async fn list_library(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LibraryParams>,
) -> AppResult<Json<DataResponse<Vec<LibraryEntry>>>> {
    let filter = match params.filter.as_deref() {
        None => LibraryFilter::All,
        Some("following") => LibraryFilter::Following,
        Some("wishlist") => LibraryFilter::Wishlist,
        Some(other) => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown library filter: {other}"
            ))))
        }
    };

    let entries = InteractionRepo::list_library(
        &state.pool,
        auth.user_id,
        filter,
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: entries }))
}
