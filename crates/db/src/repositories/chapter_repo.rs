//! Repository for the `chapters` table.

use fable_core::types::DbId;
use sqlx::PgPool;

use crate::models::chapter::{Chapter, ChapterSummary, CreateChapter, UpdateChapter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, novel_id, chapter_number, title, body, word_count, \
                       is_published, created_at, updated_at";

/// Listing projection columns (no body).
const SUMMARY_COLUMNS: &str =
    "id, novel_id, chapter_number, title, word_count, is_published, updated_at";

/// Provides CRUD operations for chapters.
pub struct ChapterRepo;

impl ChapterRepo {
    /// Insert a new chapter for a novel, returning the created row.
    ///
    /// The word count is derived from the body at insert time. Fails with a
    /// unique violation if `(novel_id, chapter_number)` already exists.
    pub async fn create(
        pool: &PgPool,
        novel_id: DbId,
        input: &CreateChapter,
    ) -> Result<Chapter, sqlx::Error> {
        let word_count = count_words(&input.body);
        let query = format!(
            "INSERT INTO chapters (novel_id, chapter_number, title, body, word_count)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Chapter>(&query)
            .bind(novel_id)
            .bind(input.chapter_number)
            .bind(&input.title)
            .bind(&input.body)
            .bind(word_count)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Chapter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chapters WHERE id = $1");
        sqlx::query_as::<_, Chapter>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List chapter summaries for a novel in reading order.
    ///
    /// When `published_only` is `true`, drafts are excluded.
    pub async fn list_for_novel(
        pool: &PgPool,
        novel_id: DbId,
        published_only: bool,
    ) -> Result<Vec<ChapterSummary>, sqlx::Error> {
        let filter = if published_only {
            "AND is_published"
        } else {
            ""
        };
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM chapters
             WHERE novel_id = $1 {filter}
             ORDER BY chapter_number ASC"
        );
        sqlx::query_as::<_, ChapterSummary>(&query)
            .bind(novel_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Recomputes the word count when the body
    /// changes. Returns the updated row, or `None` if the chapter does not
    /// exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateChapter,
    ) -> Result<Option<Chapter>, sqlx::Error> {
        let word_count = input.body.as_deref().map(count_words);
        let query = format!(
            "UPDATE chapters SET
                chapter_number = COALESCE($2, chapter_number),
                title = COALESCE($3, title),
                body = COALESCE($4, body),
                word_count = COALESCE($5, word_count),
                is_published = COALESCE($6, is_published),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Chapter>(&query)
            .bind(id)
            .bind(input.chapter_number)
            .bind(&input.title)
            .bind(&input.body)
            .bind(word_count)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Delete a chapter. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM chapters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Whitespace-delimited word count, stored denormalized on the row.
fn count_words(body: &str) -> i32 {
    body.split_whitespace().count() as i32
}

#[cfg(test)]
mod tests {
    use super::count_words;

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("one"), 1);
        assert_eq!(count_words("a  b\n c\td"), 4);
    }
}
