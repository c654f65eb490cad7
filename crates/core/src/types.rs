//! Primitive aliases shared by the movie, user and token records.

/// Row identifier (`BIGSERIAL` in every table).
pub type DbId = i64;

/// Creation, update and token-expiry instants, always in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
