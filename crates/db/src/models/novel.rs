//! Novel entity models and DTOs.

use fable_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `novels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Novel {
    pub id: DbId,
    pub title: String,
    pub author_name: String,
    pub description: String,
    pub genre: String,
    pub status: String,
    pub cover_image_id: Option<DbId>,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Denormalized listing projection: novel plus aggregate counts.
///
/// This is what catalog listings return; the reading client caches it
/// locally as-is.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NovelSummary {
    pub id: DbId,
    pub title: String,
    pub author_name: String,
    pub genre: String,
    pub status: String,
    pub cover_image_id: Option<DbId>,
    pub chapter_count: i64,
    pub review_count: i64,
    /// Average rating across reviews; `None` when the novel has no reviews.
    pub average_rating: Option<f64>,
    pub updated_at: Timestamp,
}

/// DTO for creating a novel.
#[derive(Debug, Deserialize)]
pub struct CreateNovel {
    pub title: String,
    pub author_name: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub cover_image_id: Option<DbId>,
}

/// DTO for updating a novel. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateNovel {
    pub title: Option<String>,
    pub author_name: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub status: Option<String>,
    pub cover_image_id: Option<DbId>,
    pub is_published: Option<bool>,
}

/// Filters accepted by the novel listing query.
#[derive(Debug, Default)]
pub struct NovelFilter {
    /// Case-insensitive substring match against title and author name.
    pub q: Option<String>,
    pub genre: Option<String>,
    /// When `false`, only published novels are returned.
    pub include_unpublished: bool,
}
