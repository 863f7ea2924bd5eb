//! Pagination types for API responses.

use serde::{Deserialize, Serialize};

/// Pagination parameters (from query string)
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_page_size() -> i64 {
    20
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page_size: 20,
            offset: 0,
        }
    }
}

impl PaginationParams {
    pub fn new(page_size: i64, offset: i64) -> Self {
        Self {
            page_size: page_size.clamp(1, 500),
            offset: offset.max(0),
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, 500)
    }
}

/// Paginated collection response body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub total: i64,
    pub count: i64,
    pub page_size: i64,
    pub offset: i64,
    pub elements: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(elements: Vec<T>, total: i64, params: PaginationParams) -> Self {
        Self {
            total,
            count: elements.len() as i64,
            page_size: params.page_size,
            offset: params.offset,
            elements,
        }
    }

    pub fn has_next(&self) -> bool {
        self.offset + self.count < self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let p = PaginationParams::default();
        assert_eq!(p.page_size, 20);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_limit_is_clamped() {
        let p = PaginationParams::new(10_000, -3);
        assert_eq!(p.limit(), 500);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_has_next() {
        let page = Paginated::new(vec![1, 2, 3], 10, PaginationParams::new(3, 0));
        assert!(page.has_next());

        let last = Paginated::new(vec![10], 10, PaginationParams::new(3, 9));
        assert!(!last.has_next());
    }
}
