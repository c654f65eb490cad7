//! Handlers for the `/movie` resource.
//!
//! Handlers only decode the request; every business rule lives in
//! [`crate::services::MovieService`].

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use movieflix_core::movie::{MovieDto, MoviePageResponse};
use movieflix_core::types::DbId;

use crate::error::AppResult;
use crate::handlers::multipart::{optional_file, read_movie_form, require_file};
use crate::query::{PageParams, PageSortParams};
use crate::state::AppState;

/// POST /api/v1/movie/add-movie
///
/// Multipart body: `file` (the poster) and `movieDto` (JSON text).
pub async fn add_movie(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<MovieDto>)> {
    let mut form = read_movie_form(multipart).await?;
    let file = require_file(form.file.take())?;
    let dto = form.require_dto()?;

    let movie = state.movies.add_movie(dto, &file).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// GET /api/v1/movie/{movieId}
pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<DbId>,
) -> AppResult<Json<MovieDto>> {
    let movie = state.movies.get_movie(movie_id).await?;
    Ok(Json(movie))
}

/// GET /api/v1/movie/allMovies
pub async fn get_all_movies(State(state): State<AppState>) -> AppResult<Json<Vec<MovieDto>>> {
    let movies = state.movies.get_all_movies().await?;
    Ok(Json(movies))
}

/// PUT /api/v1/movie/update/{movieId}
///
/// Multipart body: `movieDtoObj` (JSON text) and an optional replacement
/// `file`. A zero-byte `file` part keeps the current poster.
pub async fn update_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<MovieDto>> {
    let mut form = read_movie_form(multipart).await?;
    let dto = form.require_dto()?;
    let file = optional_file(form.file.take());

    let movie = state
        .movies
        .update_movie(movie_id, dto, file.as_ref())
        .await?;
    Ok(Json(movie))
}

/// DELETE /api/v1/movie/delete/{movieId}
///
/// Responds with a plain-text confirmation.
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<DbId>,
) -> AppResult<String> {
    state.movies.delete_movie(movie_id).await
}

/// GET /api/v1/movie/allMoviesPage?pageNumber=&pageSize=
pub async fn get_movies_page(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<MoviePageResponse>> {
    let page = state
        .movies
        .get_all_movies_with_pagination(params.page_number, params.page_size)
        .await?;
    Ok(Json(page))
}

/// GET /api/v1/movie/allMoviesPageSort?pageNumber=&pageSize=&sortBy=&dir=
pub async fn get_movies_page_sorted(
    State(state): State<AppState>,
    Query(params): Query<PageSortParams>,
) -> AppResult<Json<MoviePageResponse>> {
    let page = state
        .movies
        .get_all_movies_with_pagination_and_sorting(
            params.page_number,
            params.page_size,
            &params.sort_by,
            &params.dir,
        )
        .await?;
    Ok(Json(page))
}
