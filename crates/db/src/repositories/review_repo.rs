//! Repository for the `reviews` table.

use fable_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{Review, UpsertReview};

/// Column list for review queries, joined with the reviewer's username.
const COLUMNS: &str =
    "r.id, r.user_id, u.username, r.novel_id, r.rating, r.body, r.created_at, r.updated_at";

/// Provides operations for reviews. One review per (user, novel); writes
/// are upserts against that unique pair.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Create or replace the user's review of a novel, returning the row.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        novel_id: DbId,
        input: &UpsertReview,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "WITH upserted AS (
                INSERT INTO reviews (user_id, novel_id, rating, body)
                VALUES ($1, $2, $3, COALESCE($4, ''))
                ON CONFLICT ON CONSTRAINT uq_reviews_user_novel
                DO UPDATE SET rating = EXCLUDED.rating, body = EXCLUDED.body,
                              updated_at = NOW()
                RETURNING *
             )
             SELECT {COLUMNS} FROM upserted r JOIN users u ON u.id = r.user_id"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(user_id)
            .bind(novel_id)
            .bind(input.rating)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// List reviews for a novel, newest first.
    pub async fn list_for_novel(
        pool: &PgPool,
        novel_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews r JOIN users u ON u.id = r.user_id
             WHERE r.novel_id = $1
             ORDER BY r.created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(novel_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Delete the user's review of a novel. Returns `true` if a row was deleted.
    pub async fn delete_for_user(
        pool: &PgPool,
        user_id: DbId,
        novel_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE user_id = $1 AND novel_id = $2")
            .bind(user_id)
            .bind(novel_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
