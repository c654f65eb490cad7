pub mod auth;
pub mod file;
pub mod health;
pub mod movie;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /movie/add-movie                 add (multipart)
/// /movie/{movieId}                 get
/// /movie/allMovies                 list all
/// /movie/update/{movieId}          update (multipart)
/// /movie/delete/{movieId}          delete
/// /movie/allMoviesPage             paged list
/// /movie/allMoviesPageSort         paged, sorted list
///
/// /auth/register                   register (public)
/// /auth/login                      login (public)
/// /auth/refresh                    refresh (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/movie", movie::router())
        .nest("/auth", auth::router())
}
