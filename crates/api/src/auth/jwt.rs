//! JWT access tokens and auth timing configuration.
//!
//! Access tokens are HS256-signed JWTs carrying a [`Claims`] payload. Refresh
//! tokens are opaque and live in the database; see
//! [`crate::services::RefreshTokenService`].

use jsonwebtoken::{encode, EncodingKey, Header};
use movieflix_core::types::DbId;
use serde::Serialize;
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// The user's role (`"USER"` or `"ADMIN"`).
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Token signing secret and lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify access tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 15).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in seconds (default: 120).
    pub refresh_token_validity_secs: i64,
}

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
const DEFAULT_REFRESH_VALIDITY_SECS: i64 = 120;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                       | Required | Default |
    /// |-------------------------------|----------|---------|
    /// | `JWT_SECRET`                  | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`      | no       | `15`    |
    /// | `REFRESH_TOKEN_VALIDITY_SECS` | no       | `120`   |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        let refresh_token_validity_secs: i64 = std::env::var("REFRESH_TOKEN_VALIDITY_SECS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_VALIDITY_SECS.to_string())
            .parse()
            .expect("REFRESH_TOKEN_VALIDITY_SECS must be a valid i64");

        Self {
            secret,
            access_token_expiry_mins,
            refresh_token_validity_secs,
        }
    }
}

/// Generate an HS256 access token for the given user.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.access_token_expiry_mins * 60;

    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}
