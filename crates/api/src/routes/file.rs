use axum::routing::{get, post};
use axum::Router;

use crate::handlers::file;
use crate::state::AppState;

/// Poster file routes, mounted at the root so derived poster URLs
/// (`{base_url}/file/{name}`) resolve directly.
///
/// ```text
/// POST   /file/upload           upload (multipart)
/// GET    /file/{fileName}       serve
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/file/upload", post(file::upload))
        .route("/file/{file_name}", get(file::serve))
}
