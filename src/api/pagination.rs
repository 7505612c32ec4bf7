//! Page-number pagination: query parameters and the list response envelope.
//!
//! List endpoints respond with `{count, next, previous, results}`, where
//! `next`/`previous` are relative hrefs or null.

use crate::core::catalog::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::{Deserialize, Serialize};

/// Pagination query parameters shared by product list endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    /// 1-based page number
    pub page: Option<u64>,
    /// Caller-requested page size, clamped to [`MAX_PAGE_SIZE`]
    pub page_size: Option<u64>,
}

impl PageParams {
    /// Effective page number, at least 1.
    #[must_use]
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective page size after defaulting and clamping.
    #[must_use]
    pub fn page_size(&self) -> u64 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

/// Standard paginated list envelope.
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    /// Total matches across all pages
    pub count: u64,
    /// Href of the next page, if any
    pub next: Option<String>,
    /// Href of the previous page, if any
    pub previous: Option<String>,
    /// Items on this page
    pub results: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    /// Builds the envelope, deriving next/previous links from the position
    /// of this page within `count`.
    #[must_use]
    pub fn new(path: &str, page: u64, page_size: u64, count: u64, results: Vec<T>) -> Self {
        let next = (page * page_size < count)
            .then(|| format!("{path}?page={}&page_size={page_size}", page + 1));
        let previous =
            (page > 1).then(|| format!("{path}?page={}&page_size={page_size}", page - 1));
        Self {
            count,
            next,
            previous,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params_defaults_and_clamping() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(), DEFAULT_PAGE_SIZE);

        let params = PageParams {
            page: Some(0),
            page_size: Some(10_000),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_links_on_middle_page() {
        let response = PaginatedResponse::new("/api/products/", 2, 10, 35, vec![1, 2, 3]);
        assert_eq!(
            response.next.as_deref(),
            Some("/api/products/?page=3&page_size=10")
        );
        assert_eq!(
            response.previous.as_deref(),
            Some("/api/products/?page=1&page_size=10")
        );
        assert_eq!(response.count, 35);
    }

    #[test]
    fn test_links_absent_at_bounds() {
        let first = PaginatedResponse::new("/p", 1, 10, 10, vec![0; 10]);
        assert!(first.next.is_none());
        assert!(first.previous.is_none());

        let last = PaginatedResponse::new("/p", 4, 10, 35, vec![0; 5]);
        assert!(last.next.is_none());
        assert_eq!(last.previous.as_deref(), Some("/p?page=3&page_size=10"));
    }
}
