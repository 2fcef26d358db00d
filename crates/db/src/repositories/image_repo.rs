//! Repository for the `images` table.

use fable_core::types::DbId;
use sqlx::PgPool;

use crate::models::image::{CreateImage, Image, ImageMeta};

/// Metadata columns (everything except the byte payload).
const META_COLUMNS: &str = "id, uploader_id, filename, content_type, size_bytes, created_at";

/// Provides storage operations for images.
pub struct ImageRepo;

impl ImageRepo {
    /// Store an image, returning its metadata.
    pub async fn create(pool: &PgPool, input: &CreateImage) -> Result<ImageMeta, sqlx::Error> {
        let query = format!(
            "INSERT INTO images (uploader_id, filename, content_type, size_bytes, data)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {META_COLUMNS}"
        );
        sqlx::query_as::<_, ImageMeta>(&query)
            .bind(input.uploader_id)
            .bind(&input.filename)
            .bind(&input.content_type)
            .bind(input.data.len() as i64)
            .bind(&input.data)
            .fetch_one(pool)
            .await
    }

    /// Fetch a full image row including the byte payload.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Image>, sqlx::Error> {
        sqlx::query_as::<_, Image>(
            "SELECT id, uploader_id, filename, content_type, size_bytes, data, created_at
             FROM images WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Delete an image. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
