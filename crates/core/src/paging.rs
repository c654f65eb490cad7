//! Page/size validation and page-metadata arithmetic.
//!
//! Page numbers are zero-based. The repository layer turns a validated
//! [`PageRequest`] into `LIMIT`/`OFFSET` and hands back the total row count;
//! [`Page::new`] derives the rest.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default zero-based page number when the client omits it.
pub const DEFAULT_PAGE_NUMBER: i64 = 0;

/// Default page size when the client omits it.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

// ---------------------------------------------------------------------------
// Page request
// ---------------------------------------------------------------------------

/// A validated zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_number: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Validate raw page parameters.
    ///
    /// `page_number` must be non-negative and `page_size` must be within
    /// `1..=MAX_PAGE_SIZE`.
    pub fn new(page_number: i64, page_size: i64) -> Result<Self, CoreError> {
        if page_number < 0 {
            return Err(CoreError::Validation(format!(
                "pageNumber must not be negative, got {page_number}"
            )));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(CoreError::Validation(format!(
                "pageSize must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }
        Ok(Self {
            page_number,
            page_size,
        })
    }

    /// Row count for `LIMIT`.
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// Row offset for `OFFSET`. Saturates instead of overflowing on huge pages.
    pub fn offset(&self) -> i64 {
        self.page_number.saturating_mul(self.page_size)
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Sort direction for ordered listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// `"asc"` in any letter case is ascending; every other value is descending.
    pub fn from_param(dir: &str) -> Self {
        if dir.eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }

    /// SQL keyword for an `ORDER BY` clause.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

// ---------------------------------------------------------------------------
// Page result
// ---------------------------------------------------------------------------

/// One page of results plus the metadata derived from the total row count.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: i64,
    pub page_size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
    pub last: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: i64) -> Self {
        let total_pages = total_pages(total_elements, request.page_size);
        Self {
            content,
            page_number: request.page_number,
            page_size: request.page_size,
            total_elements,
            total_pages,
            last: request.page_number.saturating_add(1) >= total_pages,
        }
    }

    /// Convert the content while keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            last: self.last,
        }
    }
}

/// Number of pages needed to hold `total_elements` rows. Zero rows is zero pages.
pub fn total_pages(total_elements: i64, page_size: i64) -> i64 {
    if total_elements <= 0 || page_size <= 0 {
        return 0;
    }
    (total_elements + page_size - 1) / page_size
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn request(page: i64, size: i64) -> PageRequest {
        PageRequest::new(page, size).expect("valid page request")
    }

    // -- PageRequest ---------------------------------------------------------

    #[test]
    fn negative_page_is_rejected() {
        assert_matches!(PageRequest::new(-1, 10), Err(CoreError::Validation(_)));
    }

    #[test]
    fn page_size_bounds() {
        assert_matches!(PageRequest::new(0, 0), Err(CoreError::Validation(_)));
        assert_matches!(
            PageRequest::new(0, MAX_PAGE_SIZE + 1),
            Err(CoreError::Validation(_))
        );
        assert!(PageRequest::new(0, 1).is_ok());
        assert!(PageRequest::new(0, MAX_PAGE_SIZE).is_ok());
    }

    #[test]
    fn offset_is_page_times_size() {
        assert_eq!(request(0, 10).offset(), 0);
        assert_eq!(request(3, 10).offset(), 30);
        assert_eq!(request(i64::MAX, 10).offset(), i64::MAX);
    }

    // -- SortDirection -------------------------------------------------------

    #[test]
    fn asc_is_case_insensitive() {
        assert_eq!(SortDirection::from_param("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::from_param("ASC"), SortDirection::Asc);
        assert_eq!(SortDirection::from_param("Asc"), SortDirection::Asc);
    }

    #[test]
    fn anything_else_is_desc() {
        assert_eq!(SortDirection::from_param("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::from_param(""), SortDirection::Desc);
        assert_eq!(SortDirection::from_param("ascending"), SortDirection::Desc);
    }

    // -- Page ----------------------------------------------------------------

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 5), 5);
    }

    #[test]
    fn last_flag_only_on_final_page() {
        let total = 25;
        let size = 10;
        let flags: Vec<bool> = (0..3)
            .map(|p| Page::<()>::new(vec![], request(p, size), total).last)
            .collect();
        assert_eq!(flags, vec![false, false, true]);
    }

    #[test]
    fn page_past_the_end_is_last() {
        let page = Page::<()>::new(vec![], request(7, 10), 25);
        assert!(page.last);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn empty_table_reports_first_page_as_last() {
        let page = Page::<()>::new(vec![], request(0, 10), 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.last);
    }

    #[test]
    fn map_keeps_metadata() {
        let page = Page::new(vec![1, 2, 3], request(1, 3), 7).map(|n| n * 10);
        assert_eq!(page.content, vec![10, 20, 30]);
        assert_eq!(page.page_number, 1);
        assert_eq!(page.total_pages, 3);
        assert!(!page.last);
    }
}
