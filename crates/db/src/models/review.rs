//! Review entity models and DTOs.

use fable_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `reviews` table, joined with the reviewer's username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub novel_id: DbId,
    pub rating: i32,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing the caller's review of a novel.
#[derive(Debug, Deserialize)]
pub struct UpsertReview {
    pub rating: i32,
    pub body: Option<String>,
}
