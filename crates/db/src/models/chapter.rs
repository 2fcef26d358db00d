//! Chapter entity models and DTOs.

use fable_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A full row from the `chapters` table, including the body text.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Chapter {
    pub id: DbId,
    pub novel_id: DbId,
    pub chapter_number: i32,
    pub title: String,
    pub body: String,
    pub word_count: i32,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing projection without the body text (bodies can be large).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChapterSummary {
    pub id: DbId,
    pub novel_id: DbId,
    pub chapter_number: i32,
    pub title: String,
    pub word_count: i32,
    pub is_published: bool,
    pub updated_at: Timestamp,
}

/// DTO for creating a chapter.
#[derive(Debug, Deserialize)]
pub struct CreateChapter {
    pub chapter_number: i32,
    pub title: String,
    pub body: String,
}

/// DTO for updating a chapter. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateChapter {
    pub chapter_number: Option<i32>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub is_published: Option<bool>,
}
