//! Multipart form decoding shared by the movie and file handlers.
//!
//! Parts are read fully into memory; the router's body limit caps their size.

use axum::extract::Multipart;
use movieflix_core::error::CoreError;
use movieflix_core::files::UploadedFile;
use movieflix_core::movie::MovieDto;

use crate::error::{AppError, AppResult};

/// Part names under which movie metadata JSON is accepted.
const METADATA_FIELDS: [&str; 2] = ["movieDto", "movieDtoObj"];

/// The parts of a movie form that were present in the request.
#[derive(Debug, Default)]
pub struct MovieForm {
    pub dto: Option<MovieDto>,
    pub file: Option<UploadedFile>,
}

impl MovieForm {
    /// The metadata part, or a 400 when it was not sent.
    pub fn require_dto(&mut self) -> AppResult<MovieDto> {
        self.dto
            .take()
            .ok_or_else(|| AppError::BadRequest("Missing required 'movieDto' field".into()))
    }
}

/// Read the `file` part and the metadata part. Unknown parts are ignored.
pub async fn read_movie_form(mut multipart: Multipart) -> AppResult<MovieForm> {
    let mut form = MovieForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.file = Some(UploadedFile {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            n if METADATA_FIELDS.contains(&n) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let dto = serde_json::from_str::<MovieDto>(&text)
                    .map_err(|e| AppError::BadRequest(format!("Invalid movie metadata: {e}")))?;
                form.dto = Some(dto);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// A file that must be present and non-empty. A missing part counts as empty.
pub fn require_file(file: Option<UploadedFile>) -> AppResult<UploadedFile> {
    let file = file.ok_or_else(|| {
        CoreError::EmptyFile("File is empty! Please send another file!".into())
    })?;
    file.ensure_not_empty()?;
    Ok(file)
}

/// A replacement file, if one with content was sent.
pub fn optional_file(file: Option<UploadedFile>) -> Option<UploadedFile> {
    file.filter(|f| !f.bytes.is_empty())
}
