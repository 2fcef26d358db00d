//! Repository for the `novel_interactions` table.

use fable_core::types::DbId;
use sqlx::PgPool;

use crate::models::interaction::{LibraryEntry, NovelInteraction, UpsertInteraction};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, novel_id, is_following, is_wishlisted, \
                       last_read_chapter_id, reading_progress, created_at, updated_at";

/// Filter applied to `GET /me/library` listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryFilter {
    /// All novels the user has interacted with.
    All,
    /// Only novels the user follows.
    Following,
    /// Only wishlisted novels.
    Wishlist,
}

/// Provides upsert-style operations for user-novel interactions.
pub struct InteractionRepo;

impl InteractionRepo {
    /// Fetch the user's interaction record for a novel, if any.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        novel_id: DbId,
    ) -> Result<Option<NovelInteraction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM novel_interactions WHERE user_id = $1 AND novel_id = $2"
        );
        sqlx::query_as::<_, NovelInteraction>(&query)
            .bind(user_id)
            .bind(novel_id)
            .fetch_optional(pool)
            .await
    }

    /// Create or partially update the user's interaction with a novel.
    ///
    /// Absent fields keep their current value (COALESCE against the
    /// existing row); a missing row is created with defaults first.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        novel_id: DbId,
        input: &UpsertInteraction,
    ) -> Result<NovelInteraction, sqlx::Error> {
        let query = format!(
            "INSERT INTO novel_interactions
                (user_id, novel_id, is_following, is_wishlisted,
                 last_read_chapter_id, reading_progress)
             VALUES ($1, $2, COALESCE($3, false), COALESCE($4, false), $5, COALESCE($6, 0.0))
             ON CONFLICT ON CONSTRAINT uq_interactions_user_novel
             DO UPDATE SET
                is_following = COALESCE($3, novel_interactions.is_following),
                is_wishlisted = COALESCE($4, novel_interactions.is_wishlisted),
                last_read_chapter_id = COALESCE($5, novel_interactions.last_read_chapter_id),
                reading_progress = COALESCE($6, novel_interactions.reading_progress),
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NovelInteraction>(&query)
            .bind(user_id)
            .bind(novel_id)
            .bind(input.is_following)
            .bind(input.is_wishlisted)
            .bind(input.last_read_chapter_id)
            .bind(input.reading_progress)
            .fetch_one(pool)
            .await
    }

    /// List the user's library: interactions joined with novel summary
    /// fields, most recently touched first.
    pub async fn list_library(
        pool: &PgPool,
        user_id: DbId,
        filter: LibraryFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<LibraryEntry>, sqlx::Error> {
        let filter_clause = match filter {
            LibraryFilter::All => "",
            LibraryFilter::Following => "AND i.is_following",
            LibraryFilter::Wishlist => "AND i.is_wishlisted",
        };
        let query = format!(
            "SELECT i.novel_id, n.title, n.author_name, n.genre, n.status,
                    n.cover_image_id, i.is_following, i.is_wishlisted,
                    i.last_read_chapter_id, i.reading_progress, i.updated_at
             FROM novel_interactions i
             JOIN novels n ON n.id = i.novel_id
             WHERE i.user_id = $1 {filter_clause}
             ORDER BY i.updated_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, LibraryEntry>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
