//! Movie catalog domain types and rules.
//!
//! [`MovieDto`] is the externally visible shape of a movie. It never carries
//! anything the database computes except the id, and its `poster_url` is
//! always derived from the configured base URL plus the poster filename.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::paging::Page;
use crate::types::DbId;

/// Fixed path segment under which poster files are served.
pub const POSTER_PATH_SEGMENT: &str = "file";

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// External representation of a movie.
///
/// `poster` and `poster_url` default to empty on input because the server
/// fills them from the uploaded file; `movie_id` is ignored on create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MovieDto {
    #[serde(default)]
    pub movie_id: Option<DbId>,

    #[validate(custom(function = "not_blank", message = "please provide movie's title!"))]
    pub title: String,

    #[validate(custom(function = "not_blank", message = "please provide movie's director!"))]
    pub director: String,

    #[validate(custom(function = "not_blank", message = "please provide movie's studio!"))]
    pub studio: String,

    #[serde(default)]
    pub movie_cast: BTreeSet<String>,

    pub release_year: i32,

    #[serde(default)]
    pub poster: String,

    #[serde(default)]
    pub poster_url: String,
}

impl MovieDto {
    /// Run field validation, collapsing failures into a single
    /// [`CoreError::Validation`].
    ///
    /// Text fields must not contain NUL, which PostgreSQL cannot store.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;

        let text = [
            ("title", &self.title),
            ("director", &self.director),
            ("studio", &self.studio),
        ]
        .into_iter()
        .chain(self.movie_cast.iter().map(|member| ("movieCast", member)));
        for (field, value) in text {
            if value.contains('\0') {
                return Err(CoreError::Validation(format!(
                    "{field} must not contain NUL characters"
                )));
            }
        }
        Ok(())
    }
}

/// One page of movies as returned by the paginated listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviePageResponse {
    pub movie_dtos: Vec<MovieDto>,
    pub page_number: i64,
    pub page_size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
    pub is_last: bool,
}

impl From<Page<MovieDto>> for MoviePageResponse {
    fn from(page: Page<MovieDto>) -> Self {
        Self {
            movie_dtos: page.content,
            page_number: page.page_number,
            page_size: page.page_size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
            is_last: page.last,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Poster URL
// ---------------------------------------------------------------------------

/// Build the public URL of a poster: `{base_url}/file/{poster}`.
///
/// A trailing slash on `base_url` is not doubled.
pub fn poster_url(base_url: &str, poster: &str) -> String {
    format!(
        "{}/{POSTER_PATH_SEGMENT}/{poster}",
        base_url.trim_end_matches('/')
    )
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Fields a movie listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieSortField {
    MovieId,
    Title,
    Director,
    Studio,
    ReleaseYear,
    Poster,
}

/// Default `sortBy` query value.
pub const DEFAULT_SORT_BY: &str = "movieId";

/// Default `dir` query value.
pub const DEFAULT_SORT_DIR: &str = "asc";

impl MovieSortField {
    /// Parse the JSON field name used by clients (`movieId`, `releaseYear`, ...).
    pub fn from_param(name: &str) -> Result<Self, CoreError> {
        match name {
            "movieId" => Ok(Self::MovieId),
            "title" => Ok(Self::Title),
            "director" => Ok(Self::Director),
            "studio" => Ok(Self::Studio),
            "releaseYear" => Ok(Self::ReleaseYear),
            "poster" => Ok(Self::Poster),
            other => Err(CoreError::Validation(format!(
                "Cannot sort by '{other}'. Must be one of: movieId, title, director, \
                 studio, releaseYear, poster"
            ))),
        }
    }

    /// Column name in the `movies` table.
    pub fn column(self) -> &'static str {
        match self {
            Self::MovieId => "id",
            Self::Title => "title",
            Self::Director => "director",
            Self::Studio => "studio",
            Self::ReleaseYear => "release_year",
            Self::Poster => "poster",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
