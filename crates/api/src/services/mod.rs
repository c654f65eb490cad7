//! Business operations sitting between the HTTP handlers and the repositories.
//!
//! Services are plain structs holding the pool and whatever configuration
//! they need; they are built once in [`crate::state::AppState::new`].

pub mod movie_service;
pub mod refresh_token_service;

pub use movie_service::MovieService;
pub use refresh_token_service::RefreshTokenService;
