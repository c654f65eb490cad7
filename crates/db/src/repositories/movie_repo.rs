//! Repository for the `movies` table.

use movieflix_core::movie::MovieSortField;
use movieflix_core::paging::{Page, PageRequest, SortDirection};
use movieflix_core::types::DbId;
use sqlx::PgPool;

use crate::models::movie::{CreateMovie, Movie, UpdateMovie};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, director, studio, movie_cast, release_year, poster, \
                        created_at, updated_at";

/// Provides CRUD and paged listing for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (title, director, studio, movie_cast, release_year, poster)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(&input.title)
            .bind(&input.director)
            .bind(&input.studio)
            .bind(&input.movie_cast)
            .bind(input.release_year)
            .bind(&input.poster)
            .fetch_one(pool)
            .await
    }

    /// Find a movie by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every movie ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies ORDER BY id ASC");
        sqlx::query_as::<_, Movie>(&query).fetch_all(pool).await
    }

    /// Replace every mutable field of a movie.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMovie,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                title = $2,
                director = $3,
                studio = $4,
                movie_cast = $5,
                release_year = $6,
                poster = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.director)
            .bind(&input.studio)
            .bind(&input.movie_cast)
            .bind(input.release_year)
            .bind(&input.poster)
            .fetch_optional(pool)
            .await
    }

    /// Delete a movie. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of movies.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(pool)
            .await
    }

    /// Fetch one page of movies.
    ///
    /// Without `sort` the page is ordered by ID ascending. With `sort`, rows
    /// tied on the sort column are ordered by ID so pages never overlap.
    pub async fn list_page(
        pool: &PgPool,
        request: PageRequest,
        sort: Option<(MovieSortField, SortDirection)>,
    ) -> Result<Page<Movie>, sqlx::Error> {
        let order_clause = match sort {
            None | Some((MovieSortField::MovieId, SortDirection::Asc)) => "id ASC".to_string(),
            Some((MovieSortField::MovieId, SortDirection::Desc)) => "id DESC".to_string(),
            Some((field, dir)) => format!("{} {}, id ASC", field.column(), dir.as_sql()),
        };

        let query = format!(
            "SELECT {COLUMNS} FROM movies
             ORDER BY {order_clause}
             LIMIT $1 OFFSET $2"
        );
        let content = sqlx::query_as::<_, Movie>(&query)
            .bind(request.limit())
            .bind(request.offset())
            .fetch_all(pool)
            .await?;

        let total = Self::count(pool).await?;
        tracing::debug!(
            page = request.page_number,
            size = request.page_size,
            returned = content.len(),
            total,
            "Fetched movie page"
        );

        Ok(Page::new(content, request, total))
    }
}
