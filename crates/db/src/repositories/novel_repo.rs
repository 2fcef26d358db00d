//! Repository for the `novels` table.

use fable_core::types::DbId;
use sqlx::PgPool;

use crate::models::novel::{CreateNovel, Novel, NovelFilter, NovelSummary, UpdateNovel};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, author_name, description, genre, status, \
                       cover_image_id, is_published, created_at, updated_at";

/// Column list for the listing projection. Aggregates are computed with
/// lateral subqueries so the listing stays a single round trip.
const SUMMARY_COLUMNS: &str = "n.id, n.title, n.author_name, n.genre, n.status, \
     n.cover_image_id, \
     (SELECT COUNT(*) FROM chapters c WHERE c.novel_id = n.id AND c.is_published) AS chapter_count, \
     (SELECT COUNT(*) FROM reviews r WHERE r.novel_id = n.id) AS review_count, \
     (SELECT AVG(r.rating)::float8 FROM reviews r WHERE r.novel_id = n.id) AS average_rating, \
     n.updated_at";

/// Provides CRUD operations for novels.
pub struct NovelRepo;

impl NovelRepo {
    /// Insert a new novel (unpublished by default), returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateNovel) -> Result<Novel, sqlx::Error> {
        let query = format!(
            "INSERT INTO novels (title, author_name, description, genre, cover_image_id)
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, ''), $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Novel>(&query)
            .bind(&input.title)
            .bind(&input.author_name)
            .bind(&input.description)
            .bind(&input.genre)
            .bind(input.cover_image_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Novel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM novels WHERE id = $1");
        sqlx::query_as::<_, Novel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List novel summaries with optional search and genre filters.
    ///
    /// Ordered by most recently updated first, which is what the catalog
    /// screen shows.
    pub async fn list(
        pool: &PgPool,
        filter: &NovelFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<NovelSummary>, sqlx::Error> {
        let published_clause = if filter.include_unpublished {
            ""
        } else {
            "AND n.is_published"
        };
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM novels n
             WHERE ($1::text IS NULL OR n.title ILIKE '%' || $1 || '%'
                    OR n.author_name ILIKE '%' || $1 || '%')
               AND ($2::text IS NULL OR n.genre = $2)
               {published_clause}
             ORDER BY n.updated_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, NovelSummary>(&query)
            .bind(&filter.q)
            .bind(&filter.genre)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Returns the updated row, or `None` if the
    /// novel does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNovel,
    ) -> Result<Option<Novel>, sqlx::Error> {
        let query = format!(
            "UPDATE novels SET
                title = COALESCE($2, title),
                author_name = COALESCE($3, author_name),
                description = COALESCE($4, description),
                genre = COALESCE($5, genre),
                status = COALESCE($6, status),
                cover_image_id = COALESCE($7, cover_image_id),
                is_published = COALESCE($8, is_published),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Novel>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.author_name)
            .bind(&input.description)
            .bind(&input.genre)
            .bind(&input.status)
            .bind(input.cover_image_id)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Delete a novel and (via FK cascade) its chapters, comments, reviews,
    /// and interactions. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM novels WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
