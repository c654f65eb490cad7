use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Lookup by a natural key (email, token value) found nothing.
    #[error("Entity not found: {entity} with {field} {value}")]
    NotFoundByKey {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Empty file: {0}")]
    EmptyFile(String),

    #[error("Expired: {0}")]
    Expired(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
