//! Repository for the `comments` table.

use fable_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CreateComment};

/// Column list for comment queries, joined with the author's username.
const COLUMNS: &str = "c.id, c.user_id, u.username, c.novel_id, c.chapter_id, \
                       c.body, c.created_at, c.updated_at";

/// Provides CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment, returning the created row with the author joined in.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        novel_id: DbId,
        input: &CreateComment,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "WITH inserted AS (
                INSERT INTO comments (user_id, novel_id, chapter_id, body)
                VALUES ($1, $2, $3, $4)
                RETURNING *
             )
             SELECT {COLUMNS} FROM inserted c JOIN users u ON u.id = c.user_id"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(user_id)
            .bind(novel_id)
            .bind(input.chapter_id)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by id (without the username join shortcut is not
    /// needed here; callers use this for ownership checks).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM comments c JOIN users u ON u.id = c.user_id WHERE c.id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List comments for a novel, newest first. When `chapter_id` is given,
    /// only that chapter's comments are returned; otherwise all of the
    /// novel's comments (novel-level and chapter-level) are included.
    pub async fn list_for_novel(
        pool: &PgPool,
        novel_id: DbId,
        chapter_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments c JOIN users u ON u.id = c.user_id
             WHERE c.novel_id = $1
               AND ($2::bigint IS NULL OR c.chapter_id = $2)
             ORDER BY c.created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(novel_id)
            .bind(chapter_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Delete a comment. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
