//! Query parameter types for the listing endpoints.
//!
//! Missing values fall back to the defaults in `movieflix_core::paging` and
//! `movieflix_core::movie`; range checks happen in the service layer.

use movieflix_core::movie::{DEFAULT_SORT_BY, DEFAULT_SORT_DIR};
use movieflix_core::paging::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use serde::Deserialize;

/// `?pageNumber=&pageSize=`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    #[serde(default = "default_page_number")]
    pub page_number: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

/// `?pageNumber=&pageSize=&sortBy=&dir=`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSortParams {
    #[serde(default = "default_page_number")]
    pub page_number: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_dir")]
    pub dir: String,
}

fn default_page_number() -> i64 {
    DEFAULT_PAGE_NUMBER
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

fn default_sort_by() -> String {
    DEFAULT_SORT_BY.to_string()
}

fn default_dir() -> String {
    DEFAULT_SORT_DIR.to_string()
}
