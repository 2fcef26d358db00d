//! Repository for the `user_sessions` table.
//!
//! A session row backs one refresh token. Tokens are single-use: the
//! exchange path calls [`SessionRepo::consume`], which revokes the row and
//! returns it in one statement, so two concurrent exchanges of the same
//! token cannot both succeed.

use fable_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{CreateSession, UserSession};

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, is_revoked, \
                       user_agent, ip_address, created_at, updated_at";

/// How long revoked rows are kept before cleanup removes them. Rotation
/// revokes a row on every refresh; keeping them briefly lets operators
/// inspect recent token activity.
const REVOKED_RETENTION: &str = "24 hours";

pub struct SessionRepo;

impl SessionRepo {
    /// Insert a session row for a freshly issued refresh token.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at, user_agent, ip_address)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .bind(&input.user_agent)
            .bind(&input.ip_address)
            .fetch_one(pool)
            .await
    }

    /// Atomically revoke and return the live session matching a refresh
    /// token hash.
    ///
    /// Returns `None` when no live session matches: unknown hash, already
    /// consumed, or past its expiry. The `is_revoked = false` condition is
    /// what makes the token single-use under concurrency.
    pub async fn consume(pool: &PgPool, hash: &str) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "UPDATE user_sessions
             SET is_revoked = true, updated_at = NOW()
             WHERE refresh_token_hash = $1
               AND is_revoked = false
               AND expires_at > NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke every live session a user holds (logout, deactivation,
    /// password reset). Returns how many were revoked.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions
             SET is_revoked = true, updated_at = NOW()
             WHERE user_id = $1 AND is_revoked = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete sessions that can never be exchanged again: expired rows, and
    /// revoked rows older than the retention window. Returns the count of
    /// deleted rows.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let query = format!(
            "DELETE FROM user_sessions
             WHERE expires_at < NOW()
                OR (is_revoked = true AND updated_at < NOW() - INTERVAL '{REVOKED_RETENTION}')"
        );
        let result = sqlx::query(&query).execute(pool).await?;
        Ok(result.rows_affected())
    }
}
