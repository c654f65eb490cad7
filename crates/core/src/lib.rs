//! Domain types and rules for the movie catalog.
//!
//! This crate has no database dependency; callers pass in data from the
//! repository layer.

pub mod error;
pub mod files;
pub mod movie;
pub mod paging;
pub mod types;
