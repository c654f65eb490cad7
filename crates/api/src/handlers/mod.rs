pub mod auth;
pub mod file;
pub mod movie;
pub mod multipart;
