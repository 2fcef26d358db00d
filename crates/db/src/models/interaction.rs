//! User ↔ novel interaction models (follow, wishlist, reading progress).

use fable_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `novel_interactions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NovelInteraction {
    pub id: DbId,
    pub user_id: DbId,
    pub novel_id: DbId,
    pub is_following: bool,
    pub is_wishlisted: bool,
    pub last_read_chapter_id: Option<DbId>,
    /// Fraction of the last-read chapter, 0.0..=1.0.
    pub reading_progress: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting the caller's interaction with a novel.
///
/// Absent fields keep their current value; the row is created on first
/// write with defaults for anything not provided.
#[derive(Debug, Default, Deserialize)]
pub struct UpsertInteraction {
    pub is_following: Option<bool>,
    pub is_wishlisted: Option<bool>,
    pub last_read_chapter_id: Option<DbId>,
    pub reading_progress: Option<f64>,
}

/// Library listing entry: the interaction joined with its novel summary
/// fields, for `GET /me/library`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LibraryEntry {
    pub novel_id: DbId,
    pub title: String,
    pub author_name: String,
    pub genre: String,
    pub status: String,
    pub cover_image_id: Option<DbId>,
    pub is_following: bool,
    pub is_wishlisted: bool,
    pub last_read_chapter_id: Option<DbId>,
    pub reading_progress: f64,
    pub updated_at: Timestamp,
}
