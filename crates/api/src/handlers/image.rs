//! Handlers for image upload and retrieval.
//!
//! Images (novel covers, avatars) are stored as byte payloads in the
//! database. Upload is multipart; retrieval streams the raw bytes back
//! with the stored content type.

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use fable_core::error::CoreError;
use fable_core::types::DbId;
use fable_db::models::image::{CreateImage, ImageMeta};
use fable_db::repositories::ImageRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AdminUser, AuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// Content types accepted for upload.
const ALLOWED_TYPES: &[&str] = &["image/png", "image/jpeg", "image/webp"];

/// POST /api/v1/images
///
/// Multipart upload; the first `file` field is stored. Returns 201 with the
/// image metadata.
pub async fn upload_image(
    auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<ImageMeta>>)> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
        .ok_or_else(|| AppError::BadRequest("Missing file field".into()))?;

    let filename = field.file_name().unwrap_or("upload").to_string();
    let content_type = field
        .content_type()
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest("Missing content type".into()))?;

    if !ALLOWED_TYPES.contains(&content_type.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unsupported content type: {content_type}"
        ))));
    }

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

    if data.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Uploaded file is empty".into(),
        )));
    }
    if data.len() > state.config.max_image_bytes {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Image exceeds the {} byte limit",
            state.config.max_image_bytes
        ))));
    }

    let meta = ImageRepo::create(
        &state.pool,
        &CreateImage {
            uploader_id: auth.user_id,
            filename,
            content_type,
            data: data.to_vec(),
        },
    )
    .await?;
    tracing::info!(image_id = meta.id, size = meta.size_bytes, "Stored image");

    Ok((StatusCode::CREATED, Json(DataResponse { data: meta })))
}

/// GET /api/v1/images/{id}
///
/// Raw image bytes with the stored content type.
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let image = ImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Image",
            id,
        }))?;

    Ok((
        [(header::CONTENT_TYPE, image.content_type)],
        image.data,
    ))
}

/// DELETE /api/v1/images/{id} (admin only)
pub async fn delete_image(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ImageRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Image",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
