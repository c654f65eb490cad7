//! Repository for the `refresh_tokens` table.

use movieflix_core::types::DbId;
use sqlx::PgPool;

use crate::models::refresh_token::{CreateRefreshToken, RefreshToken};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, refresh_token, expiration_time, created_at";

/// Provides issue, lookup and eviction of refresh tokens.
pub struct RefreshTokenRepo;

impl RefreshTokenRepo {
    /// Insert a token for a user who has none, returning the user's token.
    ///
    /// If the user already holds one (including one inserted concurrently),
    /// nothing is written and the existing row is returned instead.
    pub async fn create_or_get(
        pool: &PgPool,
        input: &CreateRefreshToken,
    ) -> Result<RefreshToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO refresh_tokens (user_id, refresh_token, expiration_time)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, RefreshToken>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token)
            .bind(input.expiration_time)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(token) => Ok(token),
            None => {
                let query = format!("SELECT {COLUMNS} FROM refresh_tokens WHERE user_id = $1");
                sqlx::query_as::<_, RefreshToken>(&query)
                    .bind(input.user_id)
                    .fetch_one(pool)
                    .await
            }
        }
    }

    /// Find the token attached to a user, expired or not.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<RefreshToken>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM refresh_tokens WHERE user_id = $1");
        sqlx::query_as::<_, RefreshToken>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a token by its value, expired or not.
    pub async fn find_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<RefreshToken>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM refresh_tokens WHERE refresh_token = $1");
        sqlx::query_as::<_, RefreshToken>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Delete a token. Returns `true` if the row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
