//! Comment entity models and DTOs.

use fable_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `comments` table, joined with the author's username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub novel_id: DbId,
    /// `None` for novel-level comments.
    pub chapter_id: Option<DbId>,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for posting a comment.
#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub body: String,
    pub chapter_id: Option<DbId>,
}
