use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::{MovieService, RefreshTokenService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: movieflix_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Movie catalog operations.
    pub movies: MovieService,
    /// Refresh token issue and verification.
    pub refresh_tokens: RefreshTokenService,
}

impl AppState {
    /// Wire services from a pool and the loaded configuration.
    pub fn new(pool: movieflix_db::DbPool, config: ServerConfig) -> Self {
        let config = Arc::new(config);
        let movies = MovieService::new(pool.clone(), Arc::new(config.storage.clone()));
        let refresh_tokens = RefreshTokenService::new(
            pool.clone(),
            chrono::Duration::seconds(config.jwt.refresh_token_validity_secs),
        );
        Self {
            pool,
            config,
            movies,
            refresh_tokens,
        }
    }
}
