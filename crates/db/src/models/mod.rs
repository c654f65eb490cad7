//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO where the table supports updates

pub mod movie;
pub mod refresh_token;
pub mod user;
