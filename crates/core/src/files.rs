//! Poster file storage on the local filesystem.
//!
//! Files keep the name they were uploaded with. A name that is already taken
//! is rejected with [`CoreError::AlreadyExists`]. An existing file changes
//! only through [`stage_file`] followed by [`StagedFile::commit`], which
//! swaps the content in with a single rename. Every function validates the
//! filename first so a hostile multipart filename or URL segment cannot
//! escape `dir`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::AsyncWriteExt;

use crate::error::CoreError;

/// Longest filename accepted (the usual filesystem limit).
pub const MAX_FILENAME_BYTES: usize = 255;

/// An uploaded file held in memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original filename as sent by the client.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Fail with [`CoreError::EmptyFile`] when the upload has no content.
    pub fn ensure_not_empty(&self) -> Result<(), CoreError> {
        if self.bytes.is_empty() {
            return Err(CoreError::EmptyFile(
                "File is empty! Please send another file!".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Filename validation
// ---------------------------------------------------------------------------

/// Validate a bare filename: non-empty, no separators, not `.`/`..`, no NUL.
pub fn validate_filename(name: &str) -> Result<(), CoreError> {
    if name.is_empty() {
        return Err(CoreError::Validation("Filename must not be empty".into()));
    }
    if name.len() > MAX_FILENAME_BYTES {
        return Err(CoreError::Validation(format!(
            "Filename must be at most {MAX_FILENAME_BYTES} bytes"
        )));
    }
    if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(CoreError::Validation(format!("Invalid filename '{name}'")));
    }
    Ok(())
}

/// Join `dir` and a validated `name`.
pub fn resolve(dir: &Path, name: &str) -> Result<PathBuf, CoreError> {
    validate_filename(name)?;
    Ok(dir.join(name))
}

fn io_error(action: &str, path: &Path, err: std::io::Error) -> CoreError {
    CoreError::Internal(format!("Failed to {action} {}: {err}", path.display()))
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Whether a file named `name` exists in `dir`.
pub async fn file_exists(dir: &Path, name: &str) -> Result<bool, CoreError> {
    let path = resolve(dir, name)?;
    tokio::fs::try_exists(&path)
        .await
        .map_err(|e| io_error("inspect", &path, e))
}

/// Store `file` in `dir` under its original name and return that name.
///
/// Creates `dir` if needed. The target is opened with `create_new`, so the
/// existence check and the create cannot race with another upload.
pub async fn upload_file(dir: &Path, file: &UploadedFile) -> Result<String, CoreError> {
    let path = resolve(dir, &file.file_name)?;

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| io_error("create directory", dir, e))?;

    write_new(&path, &file.bytes).await.map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => CoreError::AlreadyExists(format!(
            "File '{}' already exists! Please enter another file name!",
            file.file_name
        )),
        _ => io_error("write", &path, e),
    })?;

    tracing::debug!(path = %path.display(), bytes = file.bytes.len(), "Stored uploaded file");
    Ok(file.file_name.clone())
}

/// Create `path` exclusively and write `bytes`. A failed write leaves nothing behind.
async fn write_new(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut out = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;

    let written = async {
        out.write_all(bytes).await?;
        out.flush().await
    }
    .await;

    if let Err(e) = written {
        let _ = tokio::fs::remove_file(path).await;
        return Err(e);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Staged replacement
// ---------------------------------------------------------------------------

static STAGE_SEQ: AtomicU64 = AtomicU64::new(0);

/// New content for an existing file, written beside it under a hidden name.
///
/// Nothing visible changes until [`StagedFile::commit`] renames it over the
/// target; [`StagedFile::discard`] drops it instead.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    target: PathBuf,
}

/// Write `file` to a hidden name in `dir`, to later replace `file.file_name`.
pub async fn stage_file(dir: &Path, file: &UploadedFile) -> Result<StagedFile, CoreError> {
    let target = resolve(dir, &file.file_name)?;

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| io_error("create directory", dir, e))?;

    let stamp = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let seq = STAGE_SEQ.fetch_add(1, Ordering::Relaxed);
    let path = dir.join(format!(".staged-{}-{stamp}-{seq}", std::process::id()));

    write_new(&path, &file.bytes)
        .await
        .map_err(|e| io_error("stage", &path, e))?;

    tracing::debug!(path = %path.display(), target = %target.display(), "Staged replacement file");
    Ok(StagedFile { path, target })
}

impl StagedFile {
    /// Atomically replace the target with the staged content.
    pub async fn commit(self) -> Result<(), CoreError> {
        if let Err(e) = tokio::fs::rename(&self.path, &self.target).await {
            let _ = tokio::fs::remove_file(&self.path).await;
            return Err(io_error("replace", &self.target, e));
        }
        Ok(())
    }

    /// Remove the staged content, leaving the target untouched.
    pub async fn discard(self) {
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove staged file");
        }
    }
}

/// Open a stored file for reading.
pub async fn get_resource_file(dir: &Path, name: &str) -> Result<tokio::fs::File, CoreError> {
    let path = resolve(dir, name)?;
    match tokio::fs::File::open(&path).await {
        Ok(f) => Ok(f),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(CoreError::FileNotFound(name.to_string()))
        }
        Err(e) => Err(io_error("open", &path, e)),
    }
}

/// Remove a stored file. Returns `false` if it was already gone.
pub async fn delete_file_if_exists(dir: &Path, name: &str) -> Result<bool, CoreError> {
    let path = resolve(dir, name)?;
    match tokio::fs::remove_file(&path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(io_error("delete", &path, e)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
