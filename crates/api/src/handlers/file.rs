//! Handlers for poster upload and download at `/file`.

use std::path::Path as FsPath;

use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use movieflix_core::files;
use tokio_util::io::ReaderStream;

use crate::error::AppResult;
use crate::handlers::multipart::{read_movie_form, require_file};
use crate::state::AppState;

/// POST /file/upload
///
/// Multipart body: `file`. Stores it under its own name in the poster
/// directory; a taken name is a 409.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<String> {
    let form = read_movie_form(multipart).await?;
    let file = require_file(form.file)?;

    let stored = files::upload_file(&state.config.storage.poster_dir, &file).await?;
    tracing::info!(file = %stored, bytes = file.bytes.len(), "File uploaded");
    Ok(format!("File uploaded : {stored}"))
}

/// GET /file/{fileName}
///
/// Streams the stored file with a content type guessed from its extension.
pub async fn serve(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let file = files::get_resource_file(&state.config.storage.poster_dir, &file_name).await?;
    let body = Body::from_stream(ReaderStream::new(file));

    Ok(([(header::CONTENT_TYPE, content_type_for(&file_name))], body))
}

/// MIME type for a poster filename; unknown extensions are opaque bytes.
fn content_type_for(file_name: &str) -> &'static str {
    let ext = FsPath::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
