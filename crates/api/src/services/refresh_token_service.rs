//! Refresh token issue and verification.
//!
//! Each user holds at most one token. Expiry is enforced lazily: an existing
//! token is handed out as-is by [`RefreshTokenService::create_refresh_token`]
//! and only evicted when [`RefreshTokenService::verify_refresh_token`] finds
//! it expired.

use chrono::{Duration, Utc};
use movieflix_core::error::CoreError;
use movieflix_db::models::refresh_token::{CreateRefreshToken, RefreshToken};
use movieflix_db::repositories::{RefreshTokenRepo, UserRepo};
use movieflix_db::DbPool;
use uuid::Uuid;

use crate::error::AppResult;

#[derive(Clone)]
pub struct RefreshTokenService {
    pool: DbPool,
    validity: Duration,
}

impl RefreshTokenService {
    pub fn new(pool: DbPool, validity: Duration) -> Self {
        Self { pool, validity }
    }

    /// Return the user's token, issuing one if the user has none.
    pub async fn create_refresh_token(&self, email: &str) -> AppResult<RefreshToken> {
        let user = UserRepo::find_by_email(&self.pool, email)
            .await?
            .ok_or_else(|| CoreError::NotFoundByKey {
                entity: "User",
                field: "email",
                value: email.to_string(),
            })?;

        if let Some(existing) = RefreshTokenRepo::find_by_user_id(&self.pool, user.id).await? {
            if existing.is_expired_at(Utc::now()) {
                tracing::warn!(
                    user_id = user.id,
                    expired_at = %existing.expiration_time,
                    "Handing out an expired refresh token; it is evicted on the next verify"
                );
            }
            return Ok(existing);
        }

        let input = CreateRefreshToken {
            user_id: user.id,
            refresh_token: Uuid::new_v4().to_string(),
            expiration_time: Utc::now() + self.validity,
        };
        // A concurrent first login may have won the insert; its token is returned.
        let token = RefreshTokenRepo::create_or_get(&self.pool, &input).await?;

        if token.refresh_token == input.refresh_token {
            tracing::info!(user_id = user.id, expires_at = %token.expiration_time, "Refresh token issued");
        }
        Ok(token)
    }

    /// Look up a token by value, deleting it and failing if it has expired.
    pub async fn verify_refresh_token(&self, token: &str) -> AppResult<RefreshToken> {
        let found = RefreshTokenRepo::find_by_token(&self.pool, token)
            .await?
            .ok_or_else(|| CoreError::NotFoundByKey {
                entity: "Refresh token",
                field: "value",
                value: token.to_string(),
            })?;

        if found.is_expired_at(Utc::now()) {
            RefreshTokenRepo::delete(&self.pool, found.id).await?;
            tracing::info!(user_id = found.user_id, "Expired refresh token evicted");
            return Err(CoreError::Expired("Refresh token expired!".into()).into());
        }

        Ok(found)
    }
}
