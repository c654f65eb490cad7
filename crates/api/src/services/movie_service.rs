//! Movie catalog operations: records in the database, posters on disk.

use std::path::Path;
use std::sync::Arc;

use movieflix_core::error::CoreError;
use movieflix_core::files::{self, StagedFile, UploadedFile};
use movieflix_core::movie::{poster_url, MovieDto, MoviePageResponse, MovieSortField};
use movieflix_core::paging::{PageRequest, SortDirection};
use movieflix_core::types::DbId;
use movieflix_db::models::movie::{CreateMovie, Movie};
use movieflix_db::repositories::MovieRepo;
use movieflix_db::DbPool;

use crate::config::StorageConfig;
use crate::error::AppResult;

/// Entity name used in not-found errors.
const ENTITY: &str = "Movie";

/// Orchestrates [`MovieRepo`] and the poster file store.
#[derive(Clone)]
pub struct MovieService {
    pool: DbPool,
    storage: Arc<StorageConfig>,
}

impl MovieService {
    pub fn new(pool: DbPool, storage: Arc<StorageConfig>) -> Self {
        Self { pool, storage }
    }

    fn poster_dir(&self) -> &Path {
        &self.storage.poster_dir
    }

    /// Store the poster, then insert the record. Any `movie_id` in `dto` is ignored.
    pub async fn add_movie(&self, dto: MovieDto, file: &UploadedFile) -> AppResult<MovieDto> {
        dto.check()?;

        if files::file_exists(self.poster_dir(), &file.file_name).await? {
            return Err(already_exists(&file.file_name).into());
        }
        let poster = files::upload_file(self.poster_dir(), file).await?;

        let input = CreateMovie {
            title: dto.title,
            director: dto.director,
            studio: dto.studio,
            movie_cast: dto.movie_cast.into_iter().collect(),
            release_year: dto.release_year,
            poster,
        };

        let movie = match MovieRepo::create(&self.pool, &input).await {
            Ok(movie) => movie,
            Err(err) => {
                // The record never existed, so neither should its poster.
                if let Err(cleanup) = files::delete_file_if_exists(self.poster_dir(), &input.poster).await {
                    tracing::warn!(poster = %input.poster, error = %cleanup, "Failed to remove orphaned poster");
                }
                return Err(err.into());
            }
        };

        tracing::info!(movie_id = movie.id, poster = %movie.poster, "Movie added");
        Ok(self.to_dto(movie))
    }

    pub async fn get_movie(&self, id: DbId) -> AppResult<MovieDto> {
        let movie = self.find(id).await?;
        Ok(self.to_dto(movie))
    }

    /// Every movie, ordered by id.
    pub async fn get_all_movies(&self) -> AppResult<Vec<MovieDto>> {
        let movies = MovieRepo::list(&self.pool).await?;
        Ok(movies.into_iter().map(|m| self.to_dto(m)).collect())
    }

    /// Replace a movie's fields, swapping its poster when `file` is given.
    ///
    /// Without `file` the stored poster name is kept and the filesystem is not
    /// touched. With `file`, the new content is written before the record is
    /// updated and the old poster is only removed once the update succeeds, so
    /// a failed update leaves both the record and its poster as they were.
    pub async fn update_movie(
        &self,
        id: DbId,
        dto: MovieDto,
        file: Option<&UploadedFile>,
    ) -> AppResult<MovieDto> {
        dto.check()?;
        let existing = self.find(id).await?;

        let (poster, pending) = match file {
            Some(file) if file.file_name == existing.poster => {
                let staged = files::stage_file(self.poster_dir(), file).await?;
                (existing.poster.clone(), PendingPoster::Replace(staged))
            }
            Some(file) => {
                let stored = files::upload_file(self.poster_dir(), file).await?;
                (stored, PendingPoster::Swap { old: existing.poster.clone() })
            }
            None => (existing.poster.clone(), PendingPoster::Keep),
        };

        let input = CreateMovie {
            title: dto.title,
            director: dto.director,
            studio: dto.studio,
            movie_cast: dto.movie_cast.into_iter().collect(),
            release_year: dto.release_year,
            poster,
        };

        let updated = match MovieRepo::update(&self.pool, id, &input).await {
            Ok(Some(updated)) => updated,
            Ok(None) => {
                self.roll_back(pending, &input.poster).await;
                return Err(CoreError::NotFound { entity: ENTITY, id }.into());
            }
            Err(err) => {
                self.roll_back(pending, &input.poster).await;
                return Err(err.into());
            }
        };

        match pending {
            PendingPoster::Keep => {}
            PendingPoster::Replace(staged) => staged.commit().await?,
            PendingPoster::Swap { old } => {
                match files::delete_file_if_exists(self.poster_dir(), &old).await {
                    Ok(true) => {}
                    Ok(false) => {
                        tracing::warn!(movie_id = id, poster = %old, "Old poster was already missing");
                    }
                    Err(e) => {
                        tracing::warn!(movie_id = id, poster = %old, error = %e, "Failed to remove old poster");
                    }
                }
            }
        }

        tracing::info!(movie_id = id, poster = %updated.poster, "Movie updated");
        Ok(self.to_dto(updated))
    }

    /// Undo the file side of a failed update.
    async fn roll_back(&self, pending: PendingPoster, new_poster: &str) {
        match pending {
            PendingPoster::Keep => {}
            PendingPoster::Replace(staged) => staged.discard().await,
            PendingPoster::Swap { .. } => {
                if let Err(e) = files::delete_file_if_exists(self.poster_dir(), new_poster).await {
                    tracing::warn!(poster = %new_poster, error = %e, "Failed to remove orphaned poster");
                }
            }
        }
    }

    /// Delete the poster and then the record. Returns a confirmation message.
    pub async fn delete_movie(&self, id: DbId) -> AppResult<String> {
        let movie = self.find(id).await?;

        files::delete_file_if_exists(self.poster_dir(), &movie.poster).await?;
        MovieRepo::delete(&self.pool, movie.id).await?;

        tracing::info!(movie_id = movie.id, poster = %movie.poster, "Movie deleted");
        Ok(format!("Movie deleted with id = {}", movie.id))
    }

    /// One page of movies in id order.
    pub async fn get_all_movies_with_pagination(
        &self,
        page_number: i64,
        page_size: i64,
    ) -> AppResult<MoviePageResponse> {
        let request = PageRequest::new(page_number, page_size)?;
        let page = MovieRepo::list_page(&self.pool, request, None).await?;
        Ok(page.map(|m| self.to_dto(m)).into())
    }

    /// One page of movies ordered by `sort_by`; `dir` other than `asc` means descending.
    pub async fn get_all_movies_with_pagination_and_sorting(
        &self,
        page_number: i64,
        page_size: i64,
        sort_by: &str,
        dir: &str,
    ) -> AppResult<MoviePageResponse> {
        let request = PageRequest::new(page_number, page_size)?;
        let sort = (MovieSortField::from_param(sort_by)?, SortDirection::from_param(dir));
        let page = MovieRepo::list_page(&self.pool, request, Some(sort)).await?;
        Ok(page.map(|m| self.to_dto(m)).into())
    }

    async fn find(&self, id: DbId) -> AppResult<Movie> {
        let movie = MovieRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
        Ok(movie)
    }

    fn to_dto(&self, movie: Movie) -> MovieDto {
        let poster_url = poster_url(&self.storage.base_url, &movie.poster);
        MovieDto {
            movie_id: Some(movie.id),
            title: movie.title,
            director: movie.director,
            studio: movie.studio,
            movie_cast: movie.movie_cast.into_iter().collect(),
            release_year: movie.release_year,
            poster: movie.poster,
            poster_url,
        }
    }
}

/// File work written ahead of a movie update, settled once the row is saved.
enum PendingPoster {
    /// No replacement file.
    Keep,
    /// Same poster name; new content waits under a hidden name.
    Replace(StagedFile),
    /// New poster name already stored; `old` goes once the row points away from it.
    Swap { old: String },
}

fn already_exists(name: &str) -> CoreError {
    CoreError::AlreadyExists(format!(
        "File '{name}' already exists! Please enter another file name!"
    ))
}
