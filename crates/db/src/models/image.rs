//! Image entity models.

use fable_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Metadata for a stored image, without the byte payload.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ImageMeta {
    pub id: DbId,
    pub uploader_id: DbId,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub created_at: Timestamp,
}

/// A full image row including the byte payload.
#[derive(Debug, Clone, FromRow)]
pub struct Image {
    pub id: DbId,
    pub uploader_id: DbId,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub data: Vec<u8>,
    pub created_at: Timestamp,
}

/// DTO for storing a new image.
pub struct CreateImage {
    pub uploader_id: DbId,
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}
