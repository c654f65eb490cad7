//! Refresh token model and DTOs.

use movieflix_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `refresh_tokens` table.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token: String,
    pub expiration_time: Timestamp,
    pub created_at: Timestamp,
}

impl RefreshToken {
    /// Whether the token's expiration instant lies before `now`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expiration_time < now
    }
}

/// DTO for issuing a refresh token.
pub struct CreateRefreshToken {
    pub user_id: DbId,
    pub refresh_token: String,
    pub expiration_time: Timestamp,
}
