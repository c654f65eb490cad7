use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::movie;
use crate::state::AppState;

/// Routes mounted at `/movie`.
///
/// ```text
/// POST   /add-movie             add_movie (multipart)
/// GET    /allMovies             get_all_movies
/// GET    /allMoviesPage         get_movies_page
/// GET    /allMoviesPageSort     get_movies_page_sorted
/// GET    /{movieId}             get_movie
/// PUT    /update/{movieId}      update_movie (multipart)
/// DELETE /delete/{movieId}      delete_movie
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add-movie", post(movie::add_movie))
        .route("/allMovies", get(movie::get_all_movies))
        .route("/allMoviesPage", get(movie::get_movies_page))
        .route("/allMoviesPageSort", get(movie::get_movies_page_sorted))
        .route("/{movie_id}", get(movie::get_movie))
        .route("/update/{movie_id}", put(movie::update_movie))
        .route("/delete/{movie_id}", delete(movie::delete_movie))
}
